use anyhow::{Context, anyhow};
use chrono::Utc;
use schoolhub_core::{AppError, PaginationParams, hash_password};
use schoolhub_models::{CreateUserDto, User, UserRole};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_user_created;

const EMAIL_UNIQUE_INDEX: &str = "users_email_key";

/// A user row together with its password hash, for credential checks only.
#[derive(Debug, FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some(EMAIL_UNIQUE_INDEX) => AppError::conflict(anyhow!("Email already registered")),
            _ => AppError::conflict(anyhow!("A user with these details already exists")),
        };
    }
    AppError::database(anyhow::Error::new(e).context("Failed to insert user"))
}

pub struct UserService;

impl UserService {
    /// Inserts a user. The e-mail pre-check gives a friendly early error; the
    /// unique index is what actually settles concurrent registrations.
    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(
        db: &PgPool,
        dto: CreateUserDto,
        created_by: Option<Uuid>,
    ) -> Result<User, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(&dto.email)
        .fetch_one(db)
        .await
        .context("Failed to check email")
        .map_err(AppError::database)?;

        if exists {
            return Err(AppError::conflict(anyhow!("Email already registered")));
        }

        let user = Self::insert_user(db, &dto, created_by).await?;

        track_user_created(user.role.as_str());
        tracing::info!(user_id = %user.id, "user created");

        Ok(user)
    }

    /// Plain insert with no pre-check; a duplicate e-mail surfaces as 409
    /// from the unique index.
    pub(crate) async fn insert_user(
        db: &PgPool,
        dto: &CreateUserDto,
        created_by: Option<Uuid>,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;
        let today = Utc::now().date_naive();
        let admission_date = (dto.role == UserRole::Student).then_some(today);
        let hire_date = dto.role.is_staff().then_some(today);
        let address = dto.address.as_ref().and_then(|a| a.to_storage_string());

        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, gender, phone, \
                 date_of_birth, address, role, department, grade_level, admission_number, \
                 admission_date, employee_number, hire_date, qualification, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {}",
            User::COLUMNS
        ))
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(dto.gender)
        .bind(&dto.phone)
        .bind(dto.date_of_birth)
        .bind(address)
        .bind(dto.role)
        .bind(dto.department)
        .bind(dto.grade_level)
        .bind(&dto.admission_number)
        .bind(admission_date)
        .bind(&dto.employee_number)
        .bind(hire_date)
        .bind(&dto.qualification)
        .bind(created_by)
        .fetch_one(db)
        .await
        .map_err(map_unique_violation)
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool, params: &PaginationParams) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at, id OFFSET $1 LIMIT $2",
            User::COLUMNS
        ))
        .bind(params.skip())
        .bind(params.limit())
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", User::COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Active users only.
    #[instrument(skip(db))]
    pub async fn get_active_user_by_email(db: &PgPool, email: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1) AND is_active = TRUE",
            User::COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn list_by_roles(
        db: &PgPool,
        roles: &[UserRole],
        params: &PaginationParams,
    ) -> Result<Vec<User>, AppError> {
        let roles: Vec<&str> = roles.iter().map(UserRole::as_str).collect();

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE role::text = ANY($1) \
             ORDER BY created_at, id OFFSET $2 LIMIT $3",
            User::COLUMNS
        ))
        .bind(roles)
        .bind(params.skip())
        .bind(params.limit())
        .fetch_all(db)
        .await
        .context("Failed to fetch users by role")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn set_active(db: &PgPool, id: Uuid, active: bool) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            User::COLUMNS
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(db)
        .await
        .context("Failed to update user status")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Resolves an active user and records the visit in one statement.
    /// `None` when the user is missing or deactivated.
    pub async fn touch_active_user(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET last_seen_at = NOW() WHERE id = $1 AND is_active = TRUE RETURNING {}",
            User::COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to resolve current user")
        .map_err(AppError::database)
    }

    pub async fn find_credentials(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        sqlx::query_as::<_, UserCredentials>(&format!(
            "SELECT {}, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
            User::COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(db)
        .await
        .context("Failed to fetch credentials")
        .map_err(AppError::database)
    }
}
