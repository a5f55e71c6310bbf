use anyhow::anyhow;
use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::{CreateUserDto, MessageResponse, User, UserRole};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_user_status_change;
use crate::modules::users::service::UserService;

pub struct HrService;

impl HrService {
    #[instrument(skip(db, hr_user, dto), fields(email = %dto.email))]
    pub async fn create_teacher(
        db: &PgPool,
        hr_user: &User,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        if dto.role != UserRole::Teacher {
            return Err(AppError::bad_request(anyhow!("Role must be teacher")));
        }

        UserService::create_user(db, dto, Some(hr_user.id)).await
    }

    #[instrument(skip(db, hr_user, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_staff(
        db: &PgPool,
        hr_user: &User,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        if !dto.role.is_staff() {
            let allowed = UserRole::STAFF
                .iter()
                .map(UserRole::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::bad_request(anyhow!(
                "Role must be one of: {}",
                allowed
            )));
        }

        UserService::create_user(db, dto, Some(hr_user.id)).await
    }

    pub async fn list_teachers(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<Vec<User>, AppError> {
        UserService::list_by_roles(db, &[UserRole::Teacher], params).await
    }

    pub async fn list_staff(db: &PgPool, params: &PaginationParams) -> Result<Vec<User>, AppError> {
        UserService::list_by_roles(db, &UserRole::STAFF, params).await
    }

    #[instrument(skip(db))]
    pub async fn set_active(
        db: &PgPool,
        user_id: Uuid,
        active: bool,
    ) -> Result<MessageResponse, AppError> {
        let user = UserService::set_active(db, user_id, active).await?;
        track_user_status_change(active);

        let verb = if active { "activated" } else { "deactivated" };
        tracing::info!(user_id = %user.id, status = verb, "user status changed");

        Ok(MessageResponse {
            message: format!("User {} has been {}", user.email, verb),
        })
    }
}
