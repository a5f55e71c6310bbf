//! Headteacher dashboard responses.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::users::Department;

pub const DEFAULT_TREND_MONTHS: i64 = 6;
pub const MAX_TREND_MONTHS: i64 = 24;
pub const DEFAULT_REGISTRATION_DAYS: i64 = 30;
pub const MAX_REGISTRATION_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    /// Distinct non-null departments across all users
    pub total_departments: i64,
    pub total_parents: i64,
    pub active_users: i64,
    pub inactive_users: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DepartmentInfo {
    pub department: Department,
    /// Earliest-created teacher of the department
    pub head_of_department: Option<String>,
    pub head_of_department_id: Option<Uuid>,
    pub total_teachers: i64,
    pub total_students: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceTrend {
    /// Month label, e.g. `"Mar 2026"`
    pub period: String,
    pub average_score: f64,
    pub total_students: i64,
    /// Share of grades at or above the pass mark, in percent
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherStats {
    pub teacher_id: Uuid,
    pub teacher_name: String,
    pub department: Option<Department>,
    pub total_classes: i64,
    pub total_students: i64,
    pub average_performance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentStats {
    pub student_id: Uuid,
    pub student_name: String,
    pub grade_level: Option<i16>,
    pub total_subjects: i64,
    pub average_score: Option<f64>,
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentRegistrations {
    pub days: i64,
    pub total_registrations: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatioResponse {
    pub ratio: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeadteacherDashboard {
    pub stats: DashboardStats,
    pub departments: Vec<DepartmentInfo>,
    pub performance_trends: Vec<PerformanceTrend>,
    pub recent_registrations: i64,
    pub teacher_student_ratio: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendsQuery {
    /// Number of months to report (1-24, default: 6)
    pub months: Option<i64>,
}

impl TrendsQuery {
    pub fn months(&self) -> i64 {
        self.months
            .unwrap_or(DEFAULT_TREND_MONTHS)
            .clamp(1, MAX_TREND_MONTHS)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegistrationsQuery {
    /// Look-back window in days (0-36500, default: 30)
    pub days: Option<i64>,
}

impl RegistrationsQuery {
    pub fn days(&self) -> i64 {
        self.days
            .unwrap_or(DEFAULT_REGISTRATION_DAYS)
            .clamp(0, MAX_REGISTRATION_DAYS)
    }
}

/// `"1:N"` with N the rounded students-per-teacher figure, or `"N/A"` when
/// there are no teachers.
pub fn format_ratio(students: i64, teachers: i64) -> String {
    if teachers <= 0 {
        return "N/A".to_string();
    }
    format!("1:{:.0}", students as f64 / teachers as f64)
}
