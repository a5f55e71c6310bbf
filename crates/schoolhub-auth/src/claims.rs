//! JWT claim set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token class. An access token is never accepted where a refresh token is
/// expected, and the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    pub token_type: TokenType,
    /// Unique token id
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TokenType::Access).unwrap(), "\"access\"");
        assert_eq!(
            serde_json::from_str::<TokenType>("\"refresh\"").unwrap(),
            TokenType::Refresh
        );
        assert!(serde_json::from_str::<TokenType>("\"mfa\"").is_err());
    }
}
