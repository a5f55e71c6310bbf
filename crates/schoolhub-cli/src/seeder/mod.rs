//! Development data seeding.

pub mod models;
pub mod users;

pub use models::{SeedConfig, StaffCounts, UserSeed};

use schoolhub_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

/// Seeds staff, parents and students described by `config`.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    // One bcrypt hash shared by every seeded account.
    let password_hash = hash_password(&config.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let ids = users::seed_users(db, &config, &password_hash).await?;

    println!(
        "✅ Seeded {} users in {:?} (password: {})",
        ids.len(),
        start_time.elapsed(),
        config.password
    );

    Ok(ids.len())
}

pub async fn clear_all(db: &PgPool) -> anyhow::Result<u64> {
    let deleted = users::clear_users(db).await?;
    println!("✅ Cleared seeded data");
    Ok(deleted)
}
