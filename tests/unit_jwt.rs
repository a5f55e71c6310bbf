use schoolhub_auth::{Claims, TokenService, TokenType};
use schoolhub_config::JwtConfig;
use uuid::Uuid;

fn service(access: &str, refresh: &str) -> TokenService {
    let config = JwtConfig::from_values(
        Some("unit-test-secret-unit-test-secret-0001".to_string()),
        Some(access.to_string()),
        Some(refresh.to_string()),
    )
    .unwrap();
    TokenService::new(&config)
}

fn decode_claims(token: &str) -> Claims {
    use jsonwebtoken::{DecodingKey, Validation, decode};
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(b"unit-test-secret-unit-test-secret-0001"),
        &Validation::default(),
    )
    .unwrap()
    .claims
}

#[test]
fn test_pair_verifies_with_matching_class() {
    let tokens = service("900", "604800");
    let user_id = Uuid::new_v4();

    let pair = tokens.issue_pair(user_id).unwrap();

    assert_eq!(tokens.verify(&pair.access_token, TokenType::Access).unwrap(), user_id);
    assert_eq!(tokens.verify(&pair.refresh_token, TokenType::Refresh).unwrap(), user_id);
}

#[test]
fn test_classes_are_not_interchangeable() {
    let tokens = service("900", "604800");
    let pair = tokens.issue_pair(Uuid::new_v4()).unwrap();

    let err = tokens.verify(&pair.access_token, TokenType::Refresh).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);

    let err = tokens.verify(&pair.refresh_token, TokenType::Access).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
}

#[test]
fn test_configured_lifetimes_are_applied() {
    let tokens = service("60", "3600");
    let pair = tokens.issue_pair(Uuid::new_v4()).unwrap();

    let access = decode_claims(&pair.access_token);
    let refresh = decode_claims(&pair.refresh_token);

    assert_eq!(access.exp - access.iat, 60);
    assert_eq!(refresh.exp - refresh.iat, 3600);
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(refresh.token_type, TokenType::Refresh);
}

#[test]
fn test_short_secret_rejected_at_startup() {
    let result = JwtConfig::from_values(Some("too-short".to_string()), None, None);
    assert!(result.is_err());
}

#[test]
fn test_missing_secret_rejected_at_startup() {
    assert!(JwtConfig::from_values(None, None, None).is_err());
}
