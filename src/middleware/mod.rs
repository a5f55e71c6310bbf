//! Request extractors and middleware for authentication and authorization.
//!
//! - [`auth`]: [`auth::CurrentUser`], the bearer-token extractor
//! - [`role`]: role gates for HR and headteacher endpoints
//!
//! ```ignore
//! use crate::middleware::role::RequireHr;
//!
//! async fn list_teachers(RequireHr(hr_user): RequireHr) -> impl IntoResponse {
//!     // only headmasters and managers get here
//! }
//! ```

pub mod auth;
pub mod role;
