use schoolhub_auth::TokenService;
use schoolhub_config::{CorsConfig, DatabaseConfig, JwtConfig};
use schoolhub_db::{init_db_pool, run_migrations};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: TokenService::new(jwt_config),
            cors_config,
        }
    }
}

/// Reads configuration, connects and migrates the database.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;

    let db = init_db_pool(&database_config).await?;
    run_migrations(&db).await?;

    Ok(AppState::new(db, &jwt_config, CorsConfig::from_env()))
}
