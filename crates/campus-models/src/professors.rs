use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{SchoolId, UserId};

/// A professor row joined with the owning user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Professor {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub email: String,
    pub school_id: Option<SchoolId>,
    pub is_active: bool,
    pub is_admin: bool,
}

/// Professor record changes are applied to the underlying account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfessorDto {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}
