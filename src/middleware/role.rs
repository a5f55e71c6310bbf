//! Role gates.
//!
//! A [`RoleGate`] is a pure predicate over the resolved user's role. Gates are
//! exposed two ways: as extractors ([`RequireHr`], [`RequireHeadteacher`])
//! for per-handler use, and as the route-layer middleware
//! [`require_headteacher`] for whole routers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use schoolhub_core::AppError;
use schoolhub_models::{User, UserRole};

use crate::metrics::track_authorization_check;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

const DEFAULT_DENIAL: &str = "You don't have permission to perform this action";

#[derive(Debug, Clone, Copy)]
pub struct RoleGate<'a> {
    pub allowed: &'a [UserRole],
    pub denial: &'a str,
}

pub const HR_GATE: RoleGate<'static> = RoleGate {
    allowed: &[UserRole::Headmaster, UserRole::Manager],
    denial: DEFAULT_DENIAL,
};

pub const HEADTEACHER_GATE: RoleGate<'static> = RoleGate {
    allowed: &[UserRole::Headmaster],
    denial: "Only headteacher can access this resource",
};

/// 403 unless the user's role is one of `allowed`.
pub fn check_any_role(user: &User, allowed: &[UserRole]) -> Result<(), AppError> {
    RoleGate {
        allowed,
        denial: DEFAULT_DENIAL,
    }
    .check(user)
}

impl RoleGate<'_> {
    pub fn check(&self, user: &User) -> Result<(), AppError> {
        let allowed = self.allowed.contains(&user.role);
        track_authorization_check(allowed, user.role.as_str());

        if !allowed {
            tracing::warn!(user_id = %user.id, role = %user.role, "role gate denied access");
            return Err(AppError::forbidden(self.denial.to_string()));
        }

        Ok(())
    }
}

macro_rules! require_gate {
    ($name:ident, $gate:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub User);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
                $gate.check(&user)?;
                Ok($name(user))
            }
        }
    };
}

require_gate!(RequireHr, HR_GATE);
require_gate!(RequireHeadteacher, HEADTEACHER_GATE);

/// Route-layer middleware applying [`HEADTEACHER_GATE`].
pub async fn require_headteacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    RequireHeadteacher::from_request_parts(&mut parts, &state).await?;
    Ok(next.run(Request::from_parts(parts, body)).await)
}
