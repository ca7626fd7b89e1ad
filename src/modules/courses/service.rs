use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::CourseId;

use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};

const COURSE_COLUMNS: &str = "id, name, course_code, elective_code, term_id";

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "The course with these details already exists in the system!"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!(
                "The term with this ID does not exist in the system!"
            ));
        }
    }
    AppError::database(e)
}

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The course with this ID does not exist in the system!"
    ))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn list_courses(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY course_code, name OFFSET $1 LIMIT $2",
            COURSE_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn find_course(db: &PgPool, id: CourseId) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: CourseId) -> Result<Course, AppError> {
        Self::find_course(db, id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("The course with this ID does not exist!"))
        })
    }

    #[instrument(skip(db, dto), fields(course.code = %dto.course_code, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (name, course_code, elective_code, term_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.course_code)
        .bind(&dto.elective_code)
        .bind(dto.term_id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(course.id = %course.id, course.code = %course.course_code, "Course created");
        Ok(course)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::find_course(db, id).await?.ok_or_else(course_not_found)?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET name = $1, course_code = $2, elective_code = $3, term_id = $4
             WHERE id = $5
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.course_code.unwrap_or(existing.course_code))
        .bind(dto.elective_code.or(existing.elective_code))
        .bind(dto.term_id.unwrap_or(existing.term_id))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(course.id = %course.id, "Course updated");
        Ok(course)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(db: &PgPool, id: CourseId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found());
        }

        info!(course.id = %id, "Course deleted");
        Ok(())
    }
}
