use campus_core::permissions::AdminPermissions;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub user_id: UserId,
    /// Capability bitmask. Negative for superusers.
    pub permissions: i32,
}

impl Admin {
    pub fn permissions(&self) -> AdminPermissions {
        AdminPermissions::new(self.permissions)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    pub user_id: UserId,
    #[serde(default)]
    #[validate(range(min = 0, message = "Permissions must not be negative"))]
    pub permissions: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminDto {
    pub user_id: UserId,
    #[validate(range(min = 0, message = "Permissions must not be negative"))]
    pub permissions: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RemoveAdminDto {
    pub user_id: UserId,
}
