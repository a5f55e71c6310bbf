//! # SchoolHub Models
//!
//! Domain models and DTOs shared by the API and the CLI.
//!
//! - [`users`]: the user row, closed role/department/gender sets, creation DTO
//! - [`value_types`]: validated [`Email`] and [`PhoneNumber`]
//! - [`auth`]: login/refresh requests and the token response
//! - [`dashboard`]: headteacher statistics responses

pub mod auth;
pub mod dashboard;
pub mod users;
pub mod value_types;

pub use auth::{LoginRequest, MessageResponse, RefreshTokenRequest, TokenResponse};
pub use dashboard::{
    DashboardStats, DepartmentInfo, HeadteacherDashboard, PerformanceTrend, RatioResponse,
    RecentRegistrations, RegistrationsQuery, StudentStats, TeacherStats, TrendsQuery,
    format_ratio,
};
pub use users::{Address, CreateUserDto, Department, Gender, User, UserRole};
pub use value_types::{Email, PhoneNumber, ValueTypeError};
