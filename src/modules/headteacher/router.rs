use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{
    get_dashboard, get_departments, get_performance_trends, get_recent_registrations, get_stats,
    get_student_stats, get_teacher_stats, get_teacher_student_ratio,
};

/// Mounted behind the `require_headteacher` route layer.
pub fn init_headteacher_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/stats", get(get_stats))
        .route("/departments", get(get_departments))
        .route("/performance-trends", get(get_performance_trends))
        .route("/teachers", get(get_teacher_stats))
        .route("/students", get(get_student_stats))
        .route("/recent-registrations", get(get_recent_registrations))
        .route("/teacher-student-ratio", get(get_teacher_student_ratio))
}
