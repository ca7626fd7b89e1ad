use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::YearId;

use crate::modules::years::model::{CreateYearDto, UpdateYearDto, Year, check_year_span};

const YEAR_COLUMNS: &str = "id, name, school_id, start_year, end_year, is_active";

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "The year with these details already exists in the system!"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!(
                "The school with this ID does not exist in the system"
            ));
        }
    }
    AppError::database(e)
}

fn year_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The year with this ID does not exist in the system!"
    ))
}

pub struct YearService;

impl YearService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "years"))]
    pub async fn list_years(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Year>, AppError> {
        let years = sqlx::query_as::<_, Year>(&format!(
            "SELECT {} FROM years ORDER BY start_year DESC, name OFFSET $1 LIMIT $2",
            YEAR_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(years)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "years"))]
    pub async fn get_year(db: &PgPool, id: YearId) -> Result<Year, AppError> {
        sqlx::query_as::<_, Year>(&format!("SELECT {} FROM years WHERE id = $1", YEAR_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow::anyhow!("The year with this ID does not exist!"))
            })
    }

    #[instrument(skip(db, dto), fields(year.name = %dto.name, db.operation = "INSERT", db.table = "years"))]
    pub async fn create_year(db: &PgPool, dto: CreateYearDto) -> Result<Year, AppError> {
        let year = sqlx::query_as::<_, Year>(&format!(
            "INSERT INTO years (name, school_id, start_year, end_year, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            YEAR_COLUMNS
        ))
        .bind(&dto.name)
        .bind(dto.school_id)
        .bind(dto.start_year)
        .bind(dto.end_year)
        .bind(dto.is_active)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(year.id = %year.id, school.id = %year.school_id, "Year created");
        Ok(year)
    }

    /// Merges the update into the stored year. The merged span is checked again.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "years"))]
    pub async fn update_year(db: &PgPool, id: YearId, dto: UpdateYearDto) -> Result<Year, AppError> {
        let existing = sqlx::query_as::<_, Year>(&format!(
            "SELECT {} FROM years WHERE id = $1",
            YEAR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(year_not_found)?;

        let start_year = dto.start_year.unwrap_or(existing.start_year);
        let end_year = dto.end_year.unwrap_or(existing.end_year);
        check_year_span(start_year, end_year).map_err(|e| {
            AppError::unprocessable(anyhow::anyhow!(
                "{}",
                e.message.unwrap_or_default()
            ))
        })?;

        let year = sqlx::query_as::<_, Year>(&format!(
            "UPDATE years SET name = $1, start_year = $2, end_year = $3, is_active = $4
             WHERE id = $5
             RETURNING {}",
            YEAR_COLUMNS
        ))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(start_year)
        .bind(end_year)
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(year.id = %year.id, "Year updated");
        Ok(year)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "years"))]
    pub async fn delete_year(db: &PgPool, id: YearId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM years WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(year_not_found());
        }

        info!(year.id = %id, "Year deleted");
        Ok(())
    }
}
