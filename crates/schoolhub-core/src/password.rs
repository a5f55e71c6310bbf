//! Password hashing and verification.
//!
//! bcrypt only looks at the first 72 bytes of its input. Longer passwords are
//! reduced to the lowercase hex SHA-256 of their UTF-8 bytes before hashing,
//! and the same reduction is applied on verification, so every byte of a long
//! password still counts.

use std::borrow::Cow;

use bcrypt::{DEFAULT_COST, hash, verify};
use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// Largest input bcrypt hashes without truncation.
pub const BCRYPT_MAX_BYTES: usize = 72;

fn prepare(password: &str) -> Cow<'_, str> {
    if password.len() > BCRYPT_MAX_BYTES {
        Cow::Owned(hex::encode(Sha256::digest(password.as_bytes())))
    } else {
        Cow::Borrowed(password)
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(prepare(password).as_ref(), DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `false` on mismatch and on a stored hash that cannot be parsed.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match verify(prepare(password).as_ref(), hashed) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_is_not_digested() {
        assert!(matches!(prepare("Short#Pass1"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_long_password_is_digested_to_hex() {
        let long = "a".repeat(73);
        let prepared = prepare(&long);
        assert_eq!(prepared.len(), 64);
        assert!(prepared.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_exactly_72_bytes_is_kept() {
        let exact = "b".repeat(72);
        assert_eq!(prepare(&exact), exact);
    }

    #[test]
    fn test_multibyte_length_counts_bytes() {
        // 25 three-byte chars = 75 bytes
        let password = "€".repeat(25);
        assert!(matches!(prepare(&password), Cow::Owned(_)));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
