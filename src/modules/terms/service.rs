use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::TermId;

use crate::modules::terms::model::{CreateTermDto, Term, UpdateTermDto, check_term_dates};

const TERM_COLUMNS: &str =
    "id, name, year_id, current_year_term, start_date, end_date, has_electives, is_active";

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "The term with these details already exists in the system!"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!(
                "The year with this ID does not exist in the system!"
            ));
        }
    }
    AppError::database(e)
}

fn term_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The term with this ID does not exist in the system!"
    ))
}

pub struct TermService;

impl TermService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "terms"))]
    pub async fn list_terms(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Term>, AppError> {
        let terms = sqlx::query_as::<_, Term>(&format!(
            "SELECT {} FROM terms ORDER BY start_date DESC, name OFFSET $1 LIMIT $2",
            TERM_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(terms)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "terms"))]
    pub async fn find_term(db: &PgPool, id: TermId) -> Result<Option<Term>, AppError> {
        let term =
            sqlx::query_as::<_, Term>(&format!("SELECT {} FROM terms WHERE id = $1", TERM_COLUMNS))
                .bind(id)
                .fetch_optional(db)
                .await?;

        Ok(term)
    }

    #[instrument(skip(db))]
    pub async fn get_term(db: &PgPool, id: TermId) -> Result<Term, AppError> {
        Self::find_term(db, id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("The term with this ID does not exist!"))
        })
    }

    #[instrument(skip(db, dto), fields(term.name = %dto.name, db.operation = "INSERT", db.table = "terms"))]
    pub async fn create_term(db: &PgPool, dto: CreateTermDto) -> Result<Term, AppError> {
        let term = sqlx::query_as::<_, Term>(&format!(
            "INSERT INTO terms (name, year_id, current_year_term, start_date, end_date, has_electives, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            TERM_COLUMNS
        ))
        .bind(&dto.name)
        .bind(dto.year_id)
        .bind(dto.current_year_term)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.has_electives)
        .bind(dto.is_active)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(term.id = %term.id, year.id = %term.year_id, "Term created");
        Ok(term)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "terms"))]
    pub async fn update_term(db: &PgPool, id: TermId, dto: UpdateTermDto) -> Result<Term, AppError> {
        let existing = Self::find_term(db, id).await?.ok_or_else(term_not_found)?;

        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let end_date = dto.end_date.or(existing.end_date);
        check_term_dates(start_date, end_date).map_err(|e| {
            AppError::unprocessable(anyhow::anyhow!("{}", e.message.unwrap_or_default()))
        })?;

        let term = sqlx::query_as::<_, Term>(&format!(
            "UPDATE terms
             SET name = $1, year_id = $2, current_year_term = $3, start_date = $4,
                 end_date = $5, has_electives = $6, is_active = $7
             WHERE id = $8
             RETURNING {}",
            TERM_COLUMNS
        ))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.year_id.unwrap_or(existing.year_id))
        .bind(dto.current_year_term.unwrap_or(existing.current_year_term))
        .bind(start_date)
        .bind(end_date)
        .bind(dto.has_electives.unwrap_or(existing.has_electives))
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(term.id = %term.id, "Term updated");
        Ok(term)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "terms"))]
    pub async fn delete_term(db: &PgPool, id: TermId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM terms WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(term_not_found());
        }

        info!(term.id = %id, "Term deleted");
        Ok(())
    }
}
