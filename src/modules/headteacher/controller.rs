use anyhow::anyhow;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::{
    DashboardStats, DepartmentInfo, HeadteacherDashboard, PerformanceTrend, RatioResponse,
    RecentRegistrations, RegistrationsQuery, StudentStats, TeacherStats, TrendsQuery,
};
use tracing::instrument;

use super::service::HeadteacherService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Full dashboard: stats, departments, six-month trends, 30-day registrations and the ratio
#[utoipa::path(
    get,
    path = "/headteacher/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = HeadteacherDashboard),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<HeadteacherDashboard>, AppError> {
    let dashboard = HeadteacherService::get_dashboard(&state.db).await?;
    Ok(Json(dashboard))
}

/// School-wide head counts
#[utoipa::path(
    get,
    path = "/headteacher/stats",
    responses(
        (status = 200, description = "Head counts", body = DashboardStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = HeadteacherService::get_stats(&state.db).await?;
    Ok(Json(stats))
}

/// Per-department head counts and head of department
#[utoipa::path(
    get,
    path = "/headteacher/departments",
    responses(
        (status = 200, description = "Departments", body = Vec<DepartmentInfo>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentInfo>>, AppError> {
    let departments = HeadteacherService::get_departments(&state.db).await?;
    Ok(Json(departments))
}

/// Monthly grade averages and pass rates, most recent month first
#[utoipa::path(
    get,
    path = "/headteacher/performance-trends",
    params(TrendsQuery),
    responses(
        (status = 200, description = "Performance trends", body = Vec<PerformanceTrend>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_performance_trends(
    State(state): State<AppState>,
    query: Result<Query<TrendsQuery>, QueryRejection>,
) -> Result<Json<Vec<PerformanceTrend>>, AppError> {
    let Query(query) = query
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let trends = HeadteacherService::get_performance_trends(&state.db, query.months()).await?;
    Ok(Json(trends))
}

/// Per-teacher class, student and performance figures
#[utoipa::path(
    get,
    path = "/headteacher/teachers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Teacher statistics", body = Vec<TeacherStats>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_teacher_stats(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<TeacherStats>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let stats = HeadteacherService::get_teacher_stats(&state.db, &params).await?;
    Ok(Json(stats))
}

/// Per-student subject, score and attendance figures
#[utoipa::path(
    get,
    path = "/headteacher/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "Student statistics", body = Vec<StudentStats>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_student_stats(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<StudentStats>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let stats = HeadteacherService::get_student_stats(&state.db, &params).await?;
    Ok(Json(stats))
}

/// Students registered within the look-back window
#[utoipa::path(
    get,
    path = "/headteacher/recent-registrations",
    params(RegistrationsQuery),
    responses(
        (status = 200, description = "Recent registrations", body = RecentRegistrations),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_recent_registrations(
    State(state): State<AppState>,
    query: Result<Query<RegistrationsQuery>, QueryRejection>,
) -> Result<Json<RecentRegistrations>, AppError> {
    let Query(query) = query
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let registrations =
        HeadteacherService::get_recent_registrations(&state.db, query.days()).await?;
    Ok(Json(registrations))
}

/// Active teacher to active student ratio
#[utoipa::path(
    get,
    path = "/headteacher/teacher-student-ratio",
    responses(
        (status = 200, description = "Ratio", body = RatioResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only headteacher can access this resource", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Headteacher"
)]
#[instrument(skip(state))]
pub async fn get_teacher_student_ratio(
    State(state): State<AppState>,
) -> Result<Json<RatioResponse>, AppError> {
    let ratio = HeadteacherService::get_teacher_student_ratio(&state.db).await?;
    Ok(Json(ratio))
}
