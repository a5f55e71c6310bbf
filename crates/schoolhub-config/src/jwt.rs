use std::env;

use crate::error::{ConfigError, parse_or};

/// Minimum accepted length of `JWT_SECRET`, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

pub const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 15 * 60;
pub const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;
/// Upper bound for either token lifetime: ten years.
pub const MAX_EXPIRY_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ACCESS_EXPIRY` and `JWT_REFRESH_EXPIRY`.
    ///
    /// There is no fallback secret: startup fails when it is missing or short.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_ACCESS_EXPIRY").ok(),
            env::var("JWT_REFRESH_EXPIRY").ok(),
        )
    }

    pub fn from_values(
        secret: Option<String>,
        access_expiry: Option<String>,
        refresh_expiry: Option<String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }

        let access_token_expiry =
            parse_or("JWT_ACCESS_EXPIRY", access_expiry, DEFAULT_ACCESS_EXPIRY_SECS)?;
        let refresh_token_expiry =
            parse_or("JWT_REFRESH_EXPIRY", refresh_expiry, DEFAULT_REFRESH_EXPIRY_SECS)?;

        for (name, value) in [
            ("JWT_ACCESS_EXPIRY", access_token_expiry),
            ("JWT_REFRESH_EXPIRY", refresh_token_expiry),
        ] {
            if value <= 0 {
                return Err(ConfigError::Invalid {
                    name,
                    reason: "must be a positive number of seconds".to_string(),
                });
            }
            if value > MAX_EXPIRY_SECS {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("must not exceed {} seconds", MAX_EXPIRY_SECS),
                });
            }
        }

        Ok(Self {
            secret,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}
