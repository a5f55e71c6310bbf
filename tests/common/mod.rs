use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_config::{CorsConfig, JwtConfig};
use schoolhub_core::hash_password;
use schoolhub_models::UserRole;
#[allow(unused_imports)]
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_PASSWORD: &str = "Test!Pass123";

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::from_values(Some(TEST_SECRET.to_string()), None, None)
        .expect("test JWT config")
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(
        pool,
        &test_jwt_config(),
        CorsConfig::from_list("http://localhost:3000"),
    )
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@school.test", Uuid::new_v4())
}

/// Inserts a user directly, bypassing the registration rules.
pub async fn create_test_user(pool: &PgPool, role: UserRole, active: bool) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash, first_name, last_name, gender, phone, role, is_active) \
         VALUES ($1, $2, 'Test', 'User', 'other', '+254700000000', $3, $4) \
         RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub fn access_token_for(user: &TestUser) -> String {
    test_state_tokens().issue_access(user.id).unwrap()
}

#[allow(dead_code)]
pub fn refresh_token_for(user: &TestUser) -> String {
    test_state_tokens().issue_refresh(user.id).unwrap()
}

fn test_state_tokens() -> schoolhub_auth::TokenService {
    schoolhub_auth::TokenService::new(&test_jwt_config())
}

#[allow(dead_code)]
pub fn registration_payload(email: &str, role: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Amina",
        "last_name": "Otieno",
        "gender": "female",
        "phone": "+254712345678",
        "role": role,
        "password": TEST_PASSWORD,
        "address": {
            "street": "12 School Lane",
            "city": "Nairobi",
            "country": "Kenya"
        }
    })
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
