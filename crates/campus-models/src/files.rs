use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, FileId, UserId};

/// An uploaded course document: material, assignment or submission.
///
/// A submission points at the assignment it answers through `submission_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseFile {
    pub id: FileId,
    pub course_id: CourseId,
    pub owner_id: UserId,
    /// Storage key of the PDF
    pub filename: String,
    pub file_type: String,
    pub submission_id: Option<FileId>,
    pub marks: Option<i32>,
}

/// Fields read from the multipart upload besides the file itself.
#[derive(Debug, Clone, Validate)]
pub struct NewCourseFile {
    pub course_id: CourseId,
    pub owner_id: UserId,
    pub filename: String,
    #[validate(length(min = 1, max = 10))]
    pub file_type: String,
    pub submission_id: Option<FileId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFileDto {
    #[validate(range(min = 0, message = "Marks must not be negative"))]
    pub marks: i32,
}
