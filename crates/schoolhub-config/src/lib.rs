//! # SchoolHub Config
//!
//! Configuration types loaded from environment variables once at startup.
//!
//! - [`jwt`]: token signing secret and token lifetimes
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen address and metrics port
//! - [`database`]: connection string and pool size
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
