use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::value_types::{Email, PhoneNumber};

/// The seven fixed roles. Role is set at creation and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Headmaster,
    Manager,
    #[serde(alias = "burser")]
    Bursar,
    Teacher,
    Librarian,
    Parent,
    Student,
}

impl UserRole {
    pub const ALL: [UserRole; 7] = [
        UserRole::Headmaster,
        UserRole::Manager,
        UserRole::Bursar,
        UserRole::Teacher,
        UserRole::Librarian,
        UserRole::Parent,
        UserRole::Student,
    ];

    /// Roles HR may create through `create-staff`.
    pub const STAFF: [UserRole; 3] = [UserRole::Librarian, UserRole::Bursar, UserRole::Teacher];

    /// Roles that may only be granted by the CLI, never by public registration.
    pub const PRIVILEGED: [UserRole; 2] = [UserRole::Headmaster, UserRole::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Headmaster => "headmaster",
            UserRole::Manager => "manager",
            UserRole::Bursar => "bursar",
            UserRole::Teacher => "teacher",
            UserRole::Librarian => "librarian",
            UserRole::Parent => "parent",
            UserRole::Student => "student",
        }
    }

    pub fn is_staff(&self) -> bool {
        Self::STAFF.contains(self)
    }

    pub fn is_privileged(&self) -> bool {
        Self::PRIVILEGED.contains(self)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "department", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Science,
    Humanities,
    Languages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A user as returned by the API. The password hash is never selected into
/// this struct.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: PhoneNumber,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub role: UserRole,
    pub department: Option<Department>,
    pub is_hod: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub grade_level: Option<i16>,
    pub admission_number: Option<String>,
    pub employee_number: Option<String>,
    pub qualification: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl User {
    /// Column list matching the fields of [`User`], for `SELECT`/`RETURNING`.
    pub const COLUMNS: &'static str = "id, email, first_name, last_name, gender, phone, \
        date_of_birth, address, role, department, is_hod, is_active, is_verified, \
        grade_level, admission_number, employee_number, qualification, created_by, \
        created_at, updated_at, last_seen_at";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub street: Option<String>,
    pub village: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Joins the non-empty parts with `", "`; `None` when every part is empty.
    pub fn to_storage_string(&self) -> Option<String> {
        let joined = [
            &self.street,
            &self.village,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    pub email: Email,
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    pub gender: Gender,
    pub phone: PhoneNumber,
    #[serde(default, alias = "dob")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<Address>,
    pub role: UserRole,
    #[serde(default)]
    pub department: Option<Department>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    /// Form 1-4, students only
    #[serde(default)]
    #[validate(range(min = 1, max = 4, message = "Grade level must be between 1 and 4"))]
    pub grade_level: Option<i16>,
    #[serde(default)]
    pub admission_number: Option<String>,
    #[serde(default)]
    pub employee_number: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
}

const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 128;
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

fn password_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Length and character-class rules for new passwords.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let chars = password.chars().count();

    if chars < PASSWORD_MIN_CHARS {
        return Err(password_error(
            "password_length",
            "Password must be at least 8 characters long",
        ));
    }
    if chars > PASSWORD_MAX_CHARS {
        return Err(password_error(
            "password_length",
            "Password cannot exceed 128 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(password_error(
            "password_uppercase",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(password_error(
            "password_lowercase",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(password_error(
            "password_digit",
            "Password must contain at least one digit",
        ));
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(password_error(
            "password_special",
            "Password must contain at least one special character",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto_json(role: &str, password: &str) -> serde_json::Value {
        json!({
            "email": "jane@school.test",
            "first_name": "Jane",
            "last_name": "Doe",
            "gender": "female",
            "phone": "+254712345678",
            "role": role,
            "password": password,
        })
    }

    #[test]
    fn test_role_parses_snake_case() {
        assert_eq!(
            serde_json::from_str::<UserRole>("\"headmaster\"").unwrap(),
            UserRole::Headmaster
        );
        assert!(serde_json::from_str::<UserRole>("\"janitor\"").is_err());
    }

    #[test]
    fn test_burser_alias() {
        assert_eq!(
            serde_json::from_str::<UserRole>("\"burser\"").unwrap(),
            UserRole::Bursar
        );
        assert_eq!(serde_json::to_string(&UserRole::Bursar).unwrap(), "\"bursar\"");
    }

    #[test]
    fn test_role_sets() {
        assert!(UserRole::Teacher.is_staff());
        assert!(!UserRole::Student.is_staff());
        assert!(UserRole::Manager.is_privileged());
        assert!(!UserRole::Parent.is_privileged());
        assert_eq!(UserRole::ALL.len(), 7);
    }

    #[test]
    fn test_address_join() {
        let address = Address {
            street: Some("12 Mango Rd".into()),
            village: None,
            city: Some("Nakuru".into()),
            postal_code: Some("  ".into()),
            country: Some("Kenya".into()),
        };
        assert_eq!(
            address.to_storage_string().as_deref(),
            Some("12 Mango Rd, Nakuru, Kenya")
        );
        assert_eq!(Address::default().to_storage_string(), None);
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password_strength("Str0ng!Pass").is_ok());

        let cases = [
            ("Sh0rt!", "password_length"),
            ("lowercase1!", "password_uppercase"),
            ("UPPERCASE1!", "password_lowercase"),
            ("NoDigits!!", "password_digit"),
            ("NoSpecial1", "password_special"),
        ];
        for (password, code) in cases {
            assert_eq!(validate_password_strength(password).unwrap_err().code, code);
        }
    }

    #[test]
    fn test_long_password_allowed() {
        let password = format!("Aa1!{}", "x".repeat(100));
        assert!(validate_password_strength(&password).is_ok());
    }

    #[test]
    fn test_dto_validation() {
        let dto: CreateUserDto = serde_json::from_value(dto_json("teacher", "Str0ng!Pass")).unwrap();
        assert!(dto.validate().is_ok());

        let weak: CreateUserDto = serde_json::from_value(dto_json("teacher", "weak")).unwrap();
        assert!(weak.validate().is_err());
    }

    #[test]
    fn test_dto_rejects_unknown_role_and_bad_phone() {
        assert!(serde_json::from_value::<CreateUserDto>(dto_json("janitor", "Str0ng!Pass")).is_err());

        let mut value = dto_json("teacher", "Str0ng!Pass");
        value["phone"] = json!("12-34");
        assert!(serde_json::from_value::<CreateUserDto>(value).is_err());
    }

    #[test]
    fn test_grade_level_range() {
        let mut value = dto_json("student", "Str0ng!Pass");
        value["grade_level"] = json!(5);
        let dto: CreateUserDto = serde_json::from_value(value).unwrap();
        assert!(dto.validate().is_err());
    }
}
