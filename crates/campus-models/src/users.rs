//! User accounts and the role each account plays.

use std::fmt;

use campus_core::password::validate_password_strength;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{SchoolId, UserId};

/// Role of an account. Stored in the `user_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Superuser,
    Student,
    Professor,
    Admin,
}

impl UserType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Superuser => "superuser",
            Self::Student => "student",
            Self::Professor => "professor",
            Self::Admin => "admin",
        }
    }

    /// Types that always carry an admin row.
    pub const fn is_administrative(&self) -> bool {
        matches!(self, Self::Admin | Self::Superuser)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: String,
    /// Storage key of the uploaded profile picture
    pub profile_picture: Option<String>,
    #[serde(skip)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_admin: bool,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub school_id: Option<SchoolId>,
}

impl User {
    pub fn is_superuser(&self) -> bool {
        self.user_type == UserType::Superuser
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub school_id: Option<SchoolId>,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
    pub school_id: Option<SchoolId>,
    #[serde(skip)]
    pub profile_picture: Option<String>,
}

/// Fields a user may change on their own account.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMeDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
}

impl From<UpdateMeDto> for UpdateUserDto {
    fn from(dto: UpdateMeDto) -> Self {
        Self {
            email: dto.email,
            password: dto.password,
            full_name: dto.full_name,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_wire_format() {
        let parsed: UserType = serde_json::from_str("\"professor\"").unwrap();
        assert_eq!(parsed, UserType::Professor);
        assert_eq!(UserType::Superuser.to_string(), "superuser");
        assert!(serde_json::from_str::<UserType>("\"janitor\"").is_err());
    }

    #[test]
    fn test_create_user_dto_defaults() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"email":"prof@example.com","password":"Secret123","type":"professor"}"#,
        )
        .unwrap();
        assert!(!dto.is_admin);
        assert!(dto.is_active);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_user_dto_rejects_weak_password() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"email":"prof@example.com","password":"secret","type":"student"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let user = User {
            id: UserId::new(),
            full_name: None,
            email: "a@b.com".to_string(),
            profile_picture: None,
            hashed_password: "$2b$12$secret".to_string(),
            is_active: true,
            is_admin: false,
            user_type: UserType::Student,
            school_id: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(json.contains(r#""type":"student""#));
    }
}
