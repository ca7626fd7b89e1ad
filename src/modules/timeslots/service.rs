use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::TimeslotId;

use crate::modules::timeslots::model::{
    CreateTimeslotDto, Timeslot, UpdateTimeslotDto, check_timeslot_order,
};

const TIMESLOT_COLUMNS: &str = "id, start_time, end_time, school_id";

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "The timeslot with these details already exists in the system!"
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

fn timeslot_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The timeslot with this ID does not exist in the system!"
    ))
}

pub struct TimeslotService;

impl TimeslotService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "timeslots"))]
    pub async fn list_timeslots(
        db: &PgPool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Timeslot>, AppError> {
        let timeslots = sqlx::query_as::<_, Timeslot>(&format!(
            "SELECT {} FROM timeslots ORDER BY school_id, start_time OFFSET $1 LIMIT $2",
            TIMESLOT_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(timeslots)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "timeslots"))]
    pub async fn find_timeslot(db: &PgPool, id: TimeslotId) -> Result<Option<Timeslot>, AppError> {
        let timeslot = sqlx::query_as::<_, Timeslot>(&format!(
            "SELECT {} FROM timeslots WHERE id = $1",
            TIMESLOT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(timeslot)
    }

    #[instrument(skip(db))]
    pub async fn get_timeslot(db: &PgPool, id: TimeslotId) -> Result<Timeslot, AppError> {
        Self::find_timeslot(db, id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("The timeslot with this ID does not exist!"))
        })
    }

    #[instrument(skip(db, dto), fields(school.id = %dto.school_id, db.operation = "INSERT", db.table = "timeslots"))]
    pub async fn create_timeslot(
        db: &PgPool,
        dto: CreateTimeslotDto,
    ) -> Result<Timeslot, AppError> {
        let timeslot = sqlx::query_as::<_, Timeslot>(&format!(
            "INSERT INTO timeslots (start_time, end_time, school_id)
             VALUES ($1, $2, $3)
             RETURNING {}",
            TIMESLOT_COLUMNS
        ))
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.school_id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(timeslot.id = %timeslot.id, "Timeslot created");
        Ok(timeslot)
    }

    /// Updates either bound. The merged slot must still end after it starts.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "timeslots"))]
    pub async fn update_timeslot(
        db: &PgPool,
        id: TimeslotId,
        dto: UpdateTimeslotDto,
    ) -> Result<Timeslot, AppError> {
        let existing = Self::find_timeslot(db, id)
            .await?
            .ok_or_else(timeslot_not_found)?;

        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);
        check_timeslot_order(start_time, end_time).map_err(|e| {
            AppError::unprocessable(anyhow::anyhow!("{}", e.message.unwrap_or_default()))
        })?;

        let timeslot = sqlx::query_as::<_, Timeslot>(&format!(
            "UPDATE timeslots SET start_time = $1, end_time = $2 WHERE id = $3 RETURNING {}",
            TIMESLOT_COLUMNS
        ))
        .bind(start_time)
        .bind(end_time)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(timeslot.id = %timeslot.id, "Timeslot updated");
        Ok(timeslot)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "timeslots"))]
    pub async fn delete_timeslot(db: &PgPool, id: TimeslotId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM timeslots WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(timeslot_not_found());
        }

        info!(timeslot.id = %id, "Timeslot deleted");
        Ok(())
    }
}
