use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use schoolhub_core::AppError;
use schoolhub_models::{CreateUserDto, LoginRequest, RefreshTokenRequest, TokenResponse, User};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Role cannot be self-registered", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive an access/refresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse),
        (status = 403, description = "Account is deactivated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.tokens, dto).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = TokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::refresh(&state.db, &state.tokens, &dto.refresh_token).await?;
    Ok(Json(response))
}
