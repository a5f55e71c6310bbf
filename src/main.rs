use dotenvy::dotenv;
use schoolhub::logging::{init_tracing, shutdown_tracer};
use schoolhub::metrics::{init_metrics, metrics_app};
use schoolhub::router::init_router;
use schoolhub::state::init_app_state;
use schoolhub_config::ServerConfig;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env()?;
    let state = init_app_state().await?;

    if let Some(handle) = init_metrics()? {
        let metrics_address = server_config.metrics_address();
        let listener = tokio::net::TcpListener::bind(&metrics_address).await?;
        info!(address = %metrics_address, "metrics server listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(address = %address, "server listening");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}
