use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::{CreateUserDto, User};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::service::AuthService;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account (same behaviour as `/auth/register`)
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Role cannot be self-registered", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
#[utoipa::path(
    get,
    path = "/users/getUsers",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    _current: CurrentUser,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<User>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let users = UserService::get_users(&state.db, &params).await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/getUser/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _current: CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id
        .map_err(|e| AppError::bad_request(anyhow!("Invalid path parameter: {}", e)))?;
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// Get an active user by e-mail address
#[utoipa::path(
    get,
    path = "/users/email/{email}",
    params(("email" = String, Path, description = "E-mail address")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(email): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_active_user_by_email(&state.db, &email).await?;
    Ok(Json(user))
}
