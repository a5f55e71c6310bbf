//! Privileged account creation.
//!
//! Headmaster and manager accounts cannot be self-registered over HTTP, so the
//! first one comes from here.

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use schoolhub_core::hash_password;
use schoolhub_models::users::validate_password_strength;
use schoolhub_models::{Email, Gender, PhoneNumber, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewPrivilegedUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub role: UserRole,
    pub password: String,
}

impl NewPrivilegedUser {
    /// Applies the same field rules the registration endpoint enforces.
    pub fn validate(&self) -> anyhow::Result<(Email, PhoneNumber)> {
        if !self.role.is_privileged() {
            bail!("Role must be headmaster or manager");
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            bail!("First and last name are required");
        }

        let email = Email::from_str(&self.email).map_err(|e| anyhow!("{}", e))?;
        let phone = PhoneNumber::from_str(&self.phone).map_err(|e| anyhow!("{}", e))?;

        validate_password_strength(&self.password).map_err(|e| {
            anyhow!(
                "{}",
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Password is too weak".to_string())
            )
        })?;

        Ok((email, phone))
    }
}

/// Inserts the account, failing if the e-mail is already taken.
pub async fn create_privileged_user(db: &PgPool, new_user: &NewPrivilegedUser) -> anyhow::Result<Uuid> {
    let (email, phone) = new_user.validate()?;

    let password_hash =
        hash_password(&new_user.password).map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash, first_name, last_name, gender, phone, role, \
             is_verified, hire_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, CURRENT_DATE) \
         ON CONFLICT ((LOWER(email))) DO NOTHING \
         RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(new_user.first_name.trim())
    .bind(new_user.last_name.trim())
    .bind(new_user.gender)
    .bind(&phone)
    .bind(new_user.role)
    .fetch_optional(db)
    .await
    .context("Failed to insert user")?;

    user_id.ok_or_else(|| anyhow!("User with this email already exists"))
}
