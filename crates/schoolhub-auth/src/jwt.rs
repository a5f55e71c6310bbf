//! Token signing and verification.
//!
//! Tokens are HS256 JWTs. The service holds the encoding and decoding keys
//! derived from [`JwtConfig`] so they are computed once, not per request.
//!
//! Expiry is checked with zero leeway: a token is accepted up to and including
//! its `exp` second and rejected afterwards.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::{Claims, TokenType};

/// Lifetimes outside chrono's range saturate instead of panicking.
fn ttl(seconds: i64) -> Duration {
    Duration::try_seconds(seconds).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    access_ttl: Duration,
    refresh_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access_ttl: ttl(config.access_token_expiry),
            refresh_ttl: ttl(config.refresh_token_expiry),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn issue_access(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_with_expiry(user_id, TokenType::Access, self.access_ttl)
    }

    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_with_expiry(user_id, TokenType::Refresh, self.refresh_ttl)
    }

    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    /// Verifies signature, expiry and token class, returning the subject.
    ///
    /// Every failure maps to 401 so callers cannot tell an expired token from
    /// a forged one.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Uuid, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("token expired"),
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("token signature mismatch")
                    }
                    _ => tracing::debug!(error = %e, "malformed token"),
                }
                AppError::unauthorized("Could not validate credentials".to_string())
            })?;

        if claims.token_type != expected {
            tracing::warn!(
                expected = %expected,
                actual = %claims.token_type,
                "token class mismatch"
            );
            return Err(AppError::unauthorized("Invalid token type".to_string()));
        }

        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    fn issue_with_expiry(
        &self,
        user_id: Uuid,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal_error("Token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            token_type,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
    }
}
