//! Bearer-token authentication.
//!
//! [`CurrentUser`] verifies the access token and then re-reads the user row
//! on every request. The lookup filters on `is_active`, so deactivating an
//! account locks out its outstanding tokens immediately, and it touches
//! `last_seen_at` in the same statement.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use schoolhub_auth::TokenType;
use schoolhub_core::AppError;
use schoolhub_models::User;

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The authenticated, active user behind the request's access token.
///
/// The resolved user is cached in request extensions so a route-layer gate
/// and the handler share one lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Not authenticated".to_string()))?;

        let user_id = state.tokens.verify(bearer.token(), TokenType::Access)?;

        let user = UserService::touch_active_user(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Could not validate credentials".to_string()))?;

        let current = CurrentUser(user);
        parts.extensions.insert(current.clone());

        Ok(current)
    }
}
