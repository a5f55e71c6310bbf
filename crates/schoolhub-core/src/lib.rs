//! # SchoolHub Core
//!
//! Core types, errors, and utilities for the SchoolHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: `skip`/`limit` query parameters for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("Sup3r$ecret")?;
//! assert!(verify_password("Sup3r$ecret", &hash));
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::PaginationParams;
pub use password::{hash_password, verify_password};
