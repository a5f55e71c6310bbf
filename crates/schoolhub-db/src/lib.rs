//! # SchoolHub DB
//!
//! Connection pool construction and schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::DatabaseConfig;
//! use schoolhub_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! ```

use schoolhub_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL pool sized by `DATABASE_MAX_CONNECTIONS`.
///
/// The pool is cheaply cloneable; build it once at startup and store it in
/// the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(max_connections = config.max_connections, "database pool ready");

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
