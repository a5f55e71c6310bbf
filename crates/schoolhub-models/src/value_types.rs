//! Validated string newtypes.
//!
//! [`Email`] and [`PhoneNumber`] validate on construction and on
//! deserialization, so a request carrying a bad value is rejected before any
//! handler runs. Values read back from the database are trusted.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgTypeInfo, Postgres},
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    InvalidEmail(String),
    InvalidPhoneNumber(String),
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            Self::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {}", msg),
        }
    }
}

/// Shared string plumbing: Display, FromStr, AsRef, sqlx TEXT mapping and a
/// validating serde Deserialize.
macro_rules! validated_string {
    ($name:ident) => {
        impl $name {
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValueTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as Encode<'q, Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(
                value: <Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                Ok(Self(<String as Decode<'r, Postgres>>::decode(value)?))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A validated e-mail address, stored as given apart from surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, format = "email", example = "jane.doe@school.test")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, ValueTypeError> {
        let email = email.into().trim().to_string();

        if email.is_empty() {
            return Err(ValueTypeError::InvalidEmail("email cannot be empty".into()));
        }

        if !email.validate_email() {
            return Err(ValueTypeError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        Ok(Self(email))
    }
}

validated_string!(Email);

/// A phone number: an optional leading `+` followed by 9 to 15 digits, with
/// no separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "+254712345678")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 9;
    const MAX_DIGITS: usize = 15;

    pub fn new(phone: impl Into<String>) -> Result<Self, ValueTypeError> {
        let phone = phone.into();
        let digits = phone.strip_prefix('+').unwrap_or(&phone);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValueTypeError::InvalidPhoneNumber(
                "Invalid phone number format".into(),
            ));
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(ValueTypeError::InvalidPhoneNumber(format!(
                "phone number must have {} to {} digits, got {}",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS,
                digits.len()
            )));
        }

        Ok(Self(phone))
    }
}

validated_string!(PhoneNumber);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("user@example.com").is_ok());
        assert_eq!(Email::new("  a.b@school.test ").unwrap().as_str(), "a.b@school.test");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("@example.com").is_err());
    }

    #[test]
    fn test_email_deserialize_validates() {
        assert!(serde_json::from_str::<Email>("\"ok@example.com\"").is_ok());
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }

    #[test]
    fn test_valid_phones() {
        for phone in ["+254712345678", "0712345678", "123456789", "+123456789012345"] {
            assert!(PhoneNumber::new(phone).is_ok(), "{phone}");
        }
    }

    #[test]
    fn test_invalid_phones() {
        for phone in [
            "",
            "+",
            "12345678",
            "1234567890123456",
            "+1 555 123 4567",
            "071-234-5678",
            "++254712345678",
            "07123abc45",
        ] {
            assert!(PhoneNumber::new(phone).is_err(), "{phone}");
        }
    }

    #[test]
    fn test_phone_deserialize_validates() {
        assert!(serde_json::from_str::<PhoneNumber>("\"+254712345678\"").is_ok());
        assert!(serde_json::from_str::<PhoneNumber>("\"call me\"").is_err());
    }
}
