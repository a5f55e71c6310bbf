//! Pagination query parameters for list endpoints.
//!
//! List endpoints accept `skip` and `limit`:
//! - `skip`: number of rows to skip (default 0, never negative)
//! - `limit`: maximum rows to return (default 100, clamped to [1, 500])
//!
//! Empty query values (`?skip=&limit=`) are treated as absent.

use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of rows to skip (default: 0)
    #[serde(default, alias = "offset", deserialize_with = "deserialize_optional_i64")]
    pub skip: Option<i64>,
    /// Maximum number of rows to return (1-500, default: 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_limit_boundary_cases() {
        let cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(500), 500),
            (Some(501), 500),
            (Some(0), 1),
            (Some(-1), 1),
            (None, 100),
        ];

        for (input, expected) in cases {
            let params = PaginationParams {
                skip: None,
                limit: input,
            };
            assert_eq!(params.limit(), expected, "limit {:?}", input);
        }
    }

    #[test]
    fn test_negative_skip_clamped() {
        let params = PaginationParams {
            skip: Some(-5),
            limit: None,
        };
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_deserialize_query_strings() {
        let json = r#"{"skip":"20","limit":"10"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.skip(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let json = r#"{"skip":"","limit":""}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_offset_alias() {
        let json = r#"{"offset":"15"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.skip(), 15);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let json = r#"{"limit":"ten"}"#;
        assert!(serde_json::from_str::<PaginationParams>(json).is_err());
    }
}
