use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{SchoolId, TermId, UserId};

/// A student row joined with the owning user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub user_id: UserId,
    pub term_id: Option<TermId>,
    pub full_name: Option<String>,
    pub email: String,
    pub school_id: Option<SchoolId>,
    pub is_active: bool,
}

/// A student as listed in a division, with their batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DivisionStudent {
    pub user_id: UserId,
    pub term_id: Option<TermId>,
    pub full_name: Option<String>,
    pub email: String,
    pub school_id: Option<SchoolId>,
    pub is_active: bool,
    pub batch_number: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub term_id: TermId,
}
