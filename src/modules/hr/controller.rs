//! HR endpoints. Every handler takes [`RequireHr`], so only headmasters and
//! managers reach the service layer.

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
use schoolhub_models::{CreateUserDto, MessageResponse, User};
use tracing::instrument;
use uuid::Uuid;

use super::service::HrService;
use crate::middleware::role::RequireHr;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/hr/create-teacher",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Teacher created", body = User),
        (status = 400, description = "Validation error or role is not teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, hr_user, dto), fields(hr_user_id = %hr_user.id))]
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireHr(hr_user): RequireHr,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = HrService::create_teacher(&state.db, &hr_user, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create a staff account (librarian, bursar or teacher)
#[utoipa::path(
    post,
    path = "/hr/create-staff",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Staff member created", body = User),
        (status = 400, description = "Validation error or role is not a staff role", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, hr_user, dto), fields(hr_user_id = %hr_user.id))]
pub async fn create_staff(
    State(state): State<AppState>,
    RequireHr(hr_user): RequireHr,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = HrService::create_staff(&state.db, &hr_user, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List teachers
#[utoipa::path(
    get,
    path = "/hr/teachers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Teachers ordered by creation time", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, _hr))]
pub async fn list_teachers(
    State(state): State<AppState>,
    _hr: RequireHr,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<User>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let users = HrService::list_teachers(&state.db, &params).await?;
    Ok(Json(users))
}

/// List staff (librarians, bursars and teachers)
#[utoipa::path(
    get,
    path = "/hr/staff",
    params(PaginationParams),
    responses(
        (status = 200, description = "Staff ordered by creation time", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, _hr))]
pub async fn list_staff(
    State(state): State<AppState>,
    _hr: RequireHr,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<User>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let users = HrService::list_staff(&state.db, &params).await?;
    Ok(Json(users))
}

/// Activate a user account
#[utoipa::path(
    patch,
    path = "/hr/activate/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User activated", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, _hr))]
pub async fn activate_user(
    State(state): State<AppState>,
    _hr: RequireHr,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id
        .map_err(|e| AppError::bad_request(anyhow!("Invalid path parameter: {}", e)))?;
    let response = HrService::set_active(&state.db, id, true).await?;
    Ok(Json(response))
}

/// Deactivate a user account
///
/// Outstanding access tokens of the user stop working immediately.
#[utoipa::path(
    patch,
    path = "/hr/deactivate/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, _hr))]
pub async fn deactivate_user(
    State(state): State<AppState>,
    _hr: RequireHr,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id
        .map_err(|e| AppError::bad_request(anyhow!("Invalid path parameter: {}", e)))?;
    let response = HrService::set_active(&state.db, id, false).await?;
    Ok(Json(response))
}

/// Get user details
#[utoipa::path(
    get,
    path = "/hr/user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - HR role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "HR"
)]
#[instrument(skip(state, _hr))]
pub async fn get_user_details(
    State(state): State<AppState>,
    _hr: RequireHr,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id
        .map_err(|e| AppError::bad_request(anyhow!("Invalid path parameter: {}", e)))?;
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}
