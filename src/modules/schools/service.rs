use sqlx::PgPool;
use tracing::{info, instrument, warn};

use campus_core::AppError;
use campus_models::ids::SchoolId;

use crate::modules::professors::model::Professor;
use crate::modules::professors::service::PROFESSOR_SELECT;
use crate::modules::schools::model::{CreateSchoolDto, School, UpdateSchoolDto};
use crate::modules::students::model::Student;
use crate::modules::students::service::STUDENT_SELECT;

fn school_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        if db_err.constraint() == Some("schools_head_key") {
            warn!("School head already assigned");
            return AppError::conflict(anyhow::anyhow!(
                "A school with this head already exists in the system."
            ));
        }
        warn!("School name already taken");
        return AppError::conflict(anyhow::anyhow!(
            "A school with this name already exists in the system."
        ));
    }
    AppError::database(e)
}

fn school_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The school with this ID does not exist in the system"
    ))
}

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn list_schools(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<School>, AppError> {
        let schools = sqlx::query_as::<_, School>(
            "SELECT id, name, head FROM schools ORDER BY name OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(schools)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_school(db: &PgPool, id: SchoolId) -> Result<School, AppError> {
        sqlx::query_as::<_, School>("SELECT id, name, head FROM schools WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(school_not_found)
    }

    #[instrument(skip(db, dto), fields(school.name = %dto.name, db.operation = "INSERT", db.table = "schools"))]
    pub async fn create_school(db: &PgPool, dto: CreateSchoolDto) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (name, head) VALUES ($1, $2) RETURNING id, name, head",
        )
        .bind(&dto.name)
        .bind(&dto.head)
        .fetch_one(db)
        .await
        .map_err(school_conflict)?;

        info!(school.id = %school.id, school.name = %school.name, "School created");
        Ok(school)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "schools"))]
    pub async fn update_school(
        db: &PgPool,
        id: SchoolId,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let existing = Self::get_school(db, id).await?;

        let school = sqlx::query_as::<_, School>(
            "UPDATE schools SET name = $1, head = $2 WHERE id = $3 RETURNING id, name, head",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.head.or(existing.head))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(school_conflict)?;

        info!(school.id = %school.id, "School updated");
        Ok(school)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "schools"))]
    pub async fn delete_school(db: &PgPool, id: SchoolId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(school_not_found());
        }

        info!(school.id = %id, "School deleted");
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn list_students(db: &PgPool, id: SchoolId) -> Result<Vec<Student>, AppError> {
        Self::get_school(db, id).await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            "{} WHERE u.school_id = $1 ORDER BY u.email",
            STUDENT_SELECT
        ))
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn list_professors(db: &PgPool, id: SchoolId) -> Result<Vec<Professor>, AppError> {
        Self::get_school(db, id).await?;

        let professors = sqlx::query_as::<_, Professor>(&format!(
            "{} WHERE u.school_id = $1 ORDER BY u.email",
            PROFESSOR_SELECT
        ))
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(professors)
    }
}
