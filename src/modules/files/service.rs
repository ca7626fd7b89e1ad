use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::{CourseId, FileId, UserId};

use crate::modules::files::model::{CourseFile, NewCourseFile};

const FILE_COLUMNS: &str = "id, course_id, owner_id, filename, file_type, submission_id, marks";

pub struct FileService;

impl FileService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "files"))]
    pub async fn find_file(db: &PgPool, id: FileId) -> Result<Option<CourseFile>, AppError> {
        let file = sqlx::query_as::<_, CourseFile>(&format!(
            "SELECT {} FROM files WHERE id = $1",
            FILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(file)
    }

    #[instrument(skip(db))]
    pub async fn get_file(db: &PgPool, id: FileId) -> Result<CourseFile, AppError> {
        Self::find_file(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("File with id {} not found", id)))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "files"))]
    pub async fn list_by_owner(db: &PgPool, owner_id: UserId) -> Result<Vec<CourseFile>, AppError> {
        let files = sqlx::query_as::<_, CourseFile>(&format!(
            "SELECT {} FROM files WHERE owner_id = $1 ORDER BY filename",
            FILE_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;

        Ok(files)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "files"))]
    pub async fn list_by_course(db: &PgPool, course_id: CourseId) -> Result<Vec<CourseFile>, AppError> {
        let files = sqlx::query_as::<_, CourseFile>(&format!(
            "SELECT {} FROM files WHERE course_id = $1 ORDER BY filename",
            FILE_COLUMNS
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(files)
    }

    /// Submissions made against an assignment.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "files"))]
    pub async fn list_submissions(
        db: &PgPool,
        assignment_id: FileId,
    ) -> Result<Vec<CourseFile>, AppError> {
        if Self::find_file(db, assignment_id).await?.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Assignment with id {} not found",
                assignment_id
            )));
        }

        let files = sqlx::query_as::<_, CourseFile>(&format!(
            "SELECT {} FROM files WHERE submission_id = $1 ORDER BY filename",
            FILE_COLUMNS
        ))
        .bind(assignment_id)
        .fetch_all(db)
        .await?;

        Ok(files)
    }

    #[instrument(skip(db, new_file), fields(course.id = %new_file.course_id, db.operation = "INSERT", db.table = "files"))]
    pub async fn create_file(db: &PgPool, new_file: NewCourseFile) -> Result<CourseFile, AppError> {
        let file = sqlx::query_as::<_, CourseFile>(&format!(
            "INSERT INTO files (course_id, owner_id, filename, file_type, submission_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            FILE_COLUMNS
        ))
        .bind(new_file.course_id)
        .bind(new_file.owner_id)
        .bind(&new_file.filename)
        .bind(&new_file.file_type)
        .bind(new_file.submission_id)
        .fetch_one(db)
        .await?;

        info!(file.id = %file.id, file.kind = %file.file_type, "File uploaded");
        Ok(file)
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "files"))]
    pub async fn set_marks(db: &PgPool, id: FileId, marks: i32) -> Result<CourseFile, AppError> {
        let file = sqlx::query_as::<_, CourseFile>(&format!(
            "UPDATE files SET marks = $1 WHERE id = $2 RETURNING {}",
            FILE_COLUMNS
        ))
        .bind(marks)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("File with id {} not found", id)))?;

        info!(file.id = %file.id, marks, "File graded");
        Ok(file)
    }
}
