pub mod auth;
pub mod headteacher;
pub mod hr;
pub mod users;

pub use self::users::service::UserService;
