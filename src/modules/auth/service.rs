use schoolhub_auth::{TokenService, TokenType};
use schoolhub_core::{AppError, verify_password};
use schoolhub_models::{CreateUserDto, LoginRequest, TokenResponse, User};
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::{track_tokens_issued, track_user_login_failure, track_user_login_success};
use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Incorrect email or password";

pub struct AuthService;

impl AuthService {
    /// Self-registration. Headmaster and manager accounts only come from the
    /// CLI, so those roles are refused here.
    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn register(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        if dto.role.is_privileged() {
            return Err(AppError::forbidden(format!(
                "Role '{}' cannot be self-registered",
                dto.role
            )));
        }

        UserService::create_user(db, dto, None).await
    }

    #[instrument(skip(db, tokens, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<TokenResponse, AppError> {
        let Some(credentials) = UserService::find_credentials(db, &dto.email).await? else {
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &credentials.password_hash) {
            track_user_login_failure("bad_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !credentials.user.is_active {
            track_user_login_failure("inactive");
            return Err(AppError::forbidden("Account is deactivated".to_string()));
        }

        let user = UserService::touch_active_user(db, credentials.user.id)
            .await?
            .ok_or_else(|| AppError::forbidden("Account is deactivated".to_string()))?;

        let pair = tokens.issue_pair(user.id)?;
        track_user_login_success(user.role.as_str());
        track_tokens_issued("login");
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(pair.into())
    }

    /// Rotates the token pair. The user must still exist and be active.
    #[instrument(skip_all)]
    pub async fn refresh(
        db: &PgPool,
        tokens: &TokenService,
        refresh_token: &str,
    ) -> Result<TokenResponse, AppError> {
        let user_id = tokens.verify(refresh_token, TokenType::Refresh)?;

        let user = UserService::touch_active_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Could not validate credentials".to_string()))?;

        let pair = tokens.issue_pair(user.id)?;
        track_tokens_issued("refresh");

        Ok(pair.into())
    }
}
