//! # SchoolHub CLI
//!
//! Administrative commands that have no HTTP counterpart: bootstrapping the
//! first headmaster or manager, and filling a development database with fake
//! users.
//!
//! ```ignore
//! use schoolhub_cli::seeder::{SeedConfig, seed_all};
//!
//! seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
