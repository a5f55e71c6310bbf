use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use schoolhub_core::PaginationParams;
use schoolhub_models::{
    Address, CreateUserDto, DashboardStats, Department, DepartmentInfo, Gender,
    HeadteacherDashboard, LoginRequest, MessageResponse, PerformanceTrend, RatioResponse,
    RecentRegistrations, RefreshTokenRequest, StudentStats, TeacherStats, TokenResponse, User,
    UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_user_by_email,
        crate::modules::hr::controller::create_teacher,
        crate::modules::hr::controller::create_staff,
        crate::modules::hr::controller::list_teachers,
        crate::modules::hr::controller::list_staff,
        crate::modules::hr::controller::activate_user,
        crate::modules::hr::controller::deactivate_user,
        crate::modules::hr::controller::get_user_details,
        crate::modules::headteacher::controller::get_dashboard,
        crate::modules::headteacher::controller::get_stats,
        crate::modules::headteacher::controller::get_departments,
        crate::modules::headteacher::controller::get_performance_trends,
        crate::modules::headteacher::controller::get_teacher_stats,
        crate::modules::headteacher::controller::get_student_stats,
        crate::modules::headteacher::controller::get_recent_registrations,
        crate::modules::headteacher::controller::get_teacher_student_ratio,
    ),
    components(
        schemas(
            User,
            UserRole,
            Gender,
            Department,
            Address,
            CreateUserDto,
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            MessageResponse,
            ErrorResponse,
            PaginationParams,
            DashboardStats,
            DepartmentInfo,
            PerformanceTrend,
            TeacherStats,
            StudentStats,
            RecentRegistrations,
            RatioResponse,
            HeadteacherDashboard,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token refresh"),
        (name = "Users", description = "User directory for authenticated users"),
        (name = "HR", description = "Staff management for headmasters and managers"),
        (name = "Headteacher", description = "Dashboard statistics for the headmaster")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "School management backend: accounts, role-based access and dashboard statistics.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/login",
            "/auth/refresh",
            "/users/getUser/{id}",
            "/hr/deactivate/{id}",
            "/headteacher/teacher-student-ratio",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
