//! Aggregate queries behind the headteacher dashboard.
//!
//! Per-row figures use scalar subqueries so joins over classes, grades and
//! attendance never multiply each other's rows.

use anyhow::Context;
use chrono::NaiveDate;
use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::dashboard::{DEFAULT_REGISTRATION_DAYS, DEFAULT_TREND_MONTHS};
use schoolhub_models::{
    DashboardStats, DepartmentInfo, HeadteacherDashboard, PerformanceTrend, RatioResponse,
    RecentRegistrations, StudentStats, TeacherStats, format_ratio,
};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

const PASS_MARK: f64 = 50.0;

#[derive(Debug, FromRow)]
struct MonthlyGrades {
    month_start: NaiveDate,
    average_score: f64,
    total_students: i64,
    pass_rate: f64,
}

impl From<MonthlyGrades> for PerformanceTrend {
    fn from(row: MonthlyGrades) -> Self {
        Self {
            period: row.month_start.format("%b %Y").to_string(),
            average_score: row.average_score,
            total_students: row.total_students,
            pass_rate: row.pass_rate,
        }
    }
}

fn to_sql_int(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}

pub struct HeadteacherService;

impl HeadteacherService {
    #[instrument(skip(db))]
    pub async fn get_stats(db: &PgPool) -> Result<DashboardStats, AppError> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT \
                 COUNT(*) FILTER (WHERE role = 'student') AS total_students, \
                 COUNT(*) FILTER (WHERE role = 'teacher') AS total_teachers, \
                 COUNT(DISTINCT department) AS total_departments, \
                 COUNT(*) FILTER (WHERE role = 'parent') AS total_parents, \
                 COUNT(*) FILTER (WHERE is_active) AS active_users, \
                 COUNT(*) FILTER (WHERE NOT is_active) AS inactive_users \
             FROM users",
        )
        .fetch_one(db)
        .await
        .context("Failed to fetch dashboard stats")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_departments(db: &PgPool) -> Result<Vec<DepartmentInfo>, AppError> {
        sqlx::query_as::<_, DepartmentInfo>(
            "SELECT d.department, \
                 hod.full_name AS head_of_department, \
                 hod.id AS head_of_department_id, \
                 (SELECT COUNT(*) FROM users t \
                   WHERE t.department = d.department AND t.role = 'teacher') AS total_teachers, \
                 (SELECT COUNT(*) FROM users s \
                   WHERE s.department = d.department AND s.role = 'student') AS total_students \
             FROM (SELECT DISTINCT department FROM users WHERE department IS NOT NULL) d \
             LEFT JOIN LATERAL ( \
                 SELECT id, first_name || ' ' || last_name AS full_name FROM users \
                 WHERE department = d.department AND role = 'teacher' \
                 ORDER BY created_at, id LIMIT 1 \
             ) hod ON TRUE \
             ORDER BY d.department",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch departments")
        .map_err(AppError::database)
    }

    /// One entry per calendar month, most recent first. Months without
    /// grades report zeros.
    #[instrument(skip(db))]
    pub async fn get_performance_trends(
        db: &PgPool,
        months: i64,
    ) -> Result<Vec<PerformanceTrend>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyGrades>(
            "SELECT m.month_ts::date AS month_start, \
                 ROUND(COALESCE(AVG(g.percentage), 0)::numeric, 2)::float8 AS average_score, \
                 COUNT(DISTINCT g.student_id) AS total_students, \
                 COALESCE(ROUND((100.0 * COUNT(g.id) FILTER (WHERE g.percentage >= $2) \
                     / NULLIF(COUNT(g.id), 0))::numeric, 2), 0)::float8 AS pass_rate \
             FROM generate_series( \
                 date_trunc('month', CURRENT_DATE::timestamp) - make_interval(months => $1 - 1), \
                 date_trunc('month', CURRENT_DATE::timestamp), \
                 interval '1 month' \
             ) AS m(month_ts) \
             LEFT JOIN grades g \
                 ON g.assessment_date >= m.month_ts::date \
                AND g.assessment_date < (m.month_ts + interval '1 month')::date \
             GROUP BY m.month_ts \
             ORDER BY m.month_ts DESC",
        )
        .bind(to_sql_int(months))
        .bind(PASS_MARK)
        .fetch_all(db)
        .await
        .context("Failed to fetch performance trends")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(PerformanceTrend::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_stats(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<Vec<TeacherStats>, AppError> {
        sqlx::query_as::<_, TeacherStats>(
            "SELECT u.id AS teacher_id, \
                 u.first_name || ' ' || u.last_name AS teacher_name, \
                 u.department, \
                 (SELECT COUNT(*) FROM classes c WHERE c.teacher_id = u.id) AS total_classes, \
                 (SELECT COUNT(DISTINCT e.student_id) FROM enrollments e \
                    JOIN classes c ON c.id = e.class_id \
                   WHERE c.teacher_id = u.id AND e.is_active) AS total_students, \
                 (SELECT ROUND(AVG(g.percentage)::numeric, 2)::float8 FROM grades g \
                    JOIN classes c ON c.id = g.class_id \
                   WHERE c.teacher_id = u.id) AS average_performance \
             FROM users u \
             WHERE u.role = 'teacher' \
             ORDER BY u.created_at, u.id \
             OFFSET $1 LIMIT $2",
        )
        .bind(params.skip())
        .bind(params.limit())
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher statistics")
        .map_err(AppError::database)
    }

    /// Attendance counts `present` and `late` as attended.
    #[instrument(skip(db))]
    pub async fn get_student_stats(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<Vec<StudentStats>, AppError> {
        sqlx::query_as::<_, StudentStats>(
            "SELECT u.id AS student_id, \
                 u.first_name || ' ' || u.last_name AS student_name, \
                 u.grade_level, \
                 (SELECT COUNT(DISTINCT c.subject_id) FROM enrollments e \
                    JOIN classes c ON c.id = e.class_id \
                   WHERE e.student_id = u.id AND e.is_active) AS total_subjects, \
                 (SELECT ROUND(AVG(g.percentage)::numeric, 2)::float8 FROM grades g \
                   WHERE g.student_id = u.id) AS average_score, \
                 (SELECT ROUND((100.0 * COUNT(*) FILTER (WHERE a.status IN ('present', 'late')) \
                     / NULLIF(COUNT(*), 0))::numeric, 2)::float8 FROM attendance a \
                   WHERE a.student_id = u.id) AS attendance_rate \
             FROM users u \
             WHERE u.role = 'student' \
             ORDER BY u.created_at, u.id \
             OFFSET $1 LIMIT $2",
        )
        .bind(params.skip())
        .bind(params.limit())
        .fetch_all(db)
        .await
        .context("Failed to fetch student statistics")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn count_recent_registrations(db: &PgPool, days: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users \
             WHERE role = 'student' AND created_at >= NOW() - make_interval(days => $1)",
        )
        .bind(to_sql_int(days))
        .fetch_one(db)
        .await
        .context("Failed to count recent registrations")
        .map_err(AppError::database)
    }

    pub async fn get_recent_registrations(
        db: &PgPool,
        days: i64,
    ) -> Result<RecentRegistrations, AppError> {
        let total_registrations = Self::count_recent_registrations(db, days).await?;

        Ok(RecentRegistrations {
            days,
            total_registrations,
            message: format!(
                "{} students registered in the last {} days",
                total_registrations, days
            ),
        })
    }

    /// Active students per active teacher.
    #[instrument(skip(db))]
    pub async fn get_teacher_student_ratio(db: &PgPool) -> Result<RatioResponse, AppError> {
        let (students, teachers) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT \
                 COUNT(*) FILTER (WHERE role = 'student' AND is_active), \
                 COUNT(*) FILTER (WHERE role = 'teacher' AND is_active) \
             FROM users",
        )
        .fetch_one(db)
        .await
        .context("Failed to compute teacher-student ratio")
        .map_err(AppError::database)?;

        let ratio = format_ratio(students, teachers);

        Ok(RatioResponse {
            message: format!("Current teacher-student ratio is {}", ratio),
            ratio,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_dashboard(db: &PgPool) -> Result<HeadteacherDashboard, AppError> {
        let (stats, departments, performance_trends, recent_registrations, ratio) = tokio::try_join!(
            Self::get_stats(db),
            Self::get_departments(db),
            Self::get_performance_trends(db, DEFAULT_TREND_MONTHS),
            Self::count_recent_registrations(db, DEFAULT_REGISTRATION_DAYS),
            Self::get_teacher_student_ratio(db),
        )?;

        Ok(HeadteacherDashboard {
            stats,
            departments,
            performance_trends,
            recent_registrations,
            teacher_student_ratio: ratio.ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_period_label() {
        let trend = PerformanceTrend::from(MonthlyGrades {
            month_start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            average_score: 71.25,
            total_students: 12,
            pass_rate: 83.33,
        });
        assert_eq!(trend.period, "Mar 2026");
        assert_eq!(trend.total_students, 12);
    }

    #[test]
    fn test_to_sql_int_saturates() {
        assert_eq!(to_sql_int(30), 30);
        assert_eq!(to_sql_int(-5), 0);
        assert_eq!(to_sql_int(i64::MAX), i32::MAX);
    }
}
