//! # SchoolHub Auth
//!
//! Token claims and the signing/verification service.
//!
//! - [`claims`]: claim set carried by every token and the token class tag
//! - [`jwt`]: [`TokenService`], built once from [`schoolhub_config::JwtConfig`]
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{TokenService, TokenType};
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//! let pair = tokens.issue_pair(user_id)?;
//! let user_id = tokens.verify(&pair.access_token, TokenType::Access)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, TokenType};
pub use jwt::{TokenPair, TokenService};
