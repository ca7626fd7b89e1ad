use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::UserId;

use crate::modules::divisions::model::Division;
use crate::modules::divisions::service::DIVISION_COLUMNS;
use crate::modules::professors::model::{Professor, UpdateProfessorDto};

pub(crate) const PROFESSOR_SELECT: &str = "SELECT p.user_id, u.full_name, u.email, u.school_id, u.is_active, u.is_admin
     FROM professors p
     JOIN users u ON u.id = p.user_id";

pub struct ProfessorService;

impl ProfessorService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "professors"))]
    pub async fn find_professor(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Professor>, AppError> {
        let professor =
            sqlx::query_as::<_, Professor>(&format!("{} WHERE p.user_id = $1", PROFESSOR_SELECT))
                .bind(user_id)
                .fetch_optional(db)
                .await?;

        Ok(professor)
    }

    #[instrument(skip(db))]
    pub async fn get_professor(db: &PgPool, user_id: UserId) -> Result<Professor, AppError> {
        Self::find_professor(db, user_id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The professor with this ID does not exist in the system"
            ))
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "professors"))]
    pub async fn list_professors(
        db: &PgPool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Professor>, AppError> {
        let professors = sqlx::query_as::<_, Professor>(&format!(
            "{} ORDER BY u.email OFFSET $1 LIMIT $2",
            PROFESSOR_SELECT
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(professors)
    }

    /// Divisions the professor teaches.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "divisions"))]
    pub async fn list_divisions(db: &PgPool, user_id: UserId) -> Result<Vec<Division>, AppError> {
        let divisions = sqlx::query_as::<_, Division>(&format!(
            "SELECT {} FROM divisions WHERE professor_id = $1 ORDER BY course_id, division_code",
            DIVISION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(divisions)
    }

    /// Applies the changes to the professor's user account.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_professor(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateProfessorDto,
    ) -> Result<Professor, AppError> {
        let existing = Self::find_professor(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("This professor does not exist!")))?;

        sqlx::query("UPDATE users SET full_name = $1, is_active = $2 WHERE id = $3")
            .bind(dto.full_name.or(existing.full_name))
            .bind(dto.is_active.unwrap_or(existing.is_active))
            .bind(user_id)
            .execute(db)
            .await?;

        info!(professor.id = %user_id, "Professor updated");
        Self::get_professor(db, user_id).await
    }
}
