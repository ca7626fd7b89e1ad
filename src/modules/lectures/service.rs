use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::ids::{DivisionId, LectureId};

use crate::modules::lectures::model::{CreateLectureDto, Lecture, UpdateLectureDto};

const LECTURE_COLUMNS: &str = "id, day, time_slot_id, division_id, type, room_number";

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "A lecture with these details already exists in the system!"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!(
                "The timeslot or division for this lecture does not exist in the system!"
            ));
        }
    }
    AppError::database(e)
}

fn lecture_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The lecture with this ID does not exist in the system!"
    ))
}

pub struct LectureService;

impl LectureService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "lectures"))]
    pub async fn list_lectures(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Lecture>, AppError> {
        let lectures = sqlx::query_as::<_, Lecture>(&format!(
            "SELECT {} FROM lectures ORDER BY division_id, day OFFSET $1 LIMIT $2",
            LECTURE_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(lectures)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "lectures"))]
    pub async fn find_lecture(db: &PgPool, id: LectureId) -> Result<Option<Lecture>, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            "SELECT {} FROM lectures WHERE id = $1",
            LECTURE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(lecture)
    }

    #[instrument(skip(db))]
    pub async fn get_lecture(db: &PgPool, id: LectureId) -> Result<Lecture, AppError> {
        Self::find_lecture(db, id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("A lecture with this ID does not exist!"))
        })
    }

    /// Lectures of the given divisions, earliest timeslot first.
    #[instrument(skip(db, division_ids), fields(divisions = division_ids.len(), db.table = "lectures"))]
    pub async fn list_for_divisions(
        db: &PgPool,
        division_ids: &[DivisionId],
    ) -> Result<Vec<Lecture>, AppError> {
        let ids: Vec<uuid::Uuid> = division_ids.iter().map(|id| id.into_inner()).collect();

        let lectures = sqlx::query_as::<_, Lecture>(
            "SELECT l.id, l.day, l.time_slot_id, l.division_id, l.type, l.room_number
             FROM lectures l
             JOIN timeslots ts ON ts.id = l.time_slot_id
             WHERE l.division_id = ANY($1)
             ORDER BY ts.start_time, l.room_number",
        )
        .bind(ids)
        .fetch_all(db)
        .await?;

        Ok(lectures)
    }

    #[instrument(skip(db, dto), fields(division.id = %dto.division_id, db.operation = "INSERT", db.table = "lectures"))]
    pub async fn create_lecture(db: &PgPool, dto: CreateLectureDto) -> Result<Lecture, AppError> {
        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            "INSERT INTO lectures (day, time_slot_id, division_id, type, room_number)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            LECTURE_COLUMNS
        ))
        .bind(&dto.day)
        .bind(dto.time_slot_id)
        .bind(dto.division_id)
        .bind(&dto.lecture_type)
        .bind(&dto.room_number)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(lecture.id = %lecture.id, lecture.day = %lecture.day, "Lecture created");
        Ok(lecture)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "lectures"))]
    pub async fn update_lecture(
        db: &PgPool,
        id: LectureId,
        dto: UpdateLectureDto,
    ) -> Result<Lecture, AppError> {
        let existing = Self::find_lecture(db, id).await?.ok_or_else(lecture_not_found)?;

        let lecture = sqlx::query_as::<_, Lecture>(&format!(
            "UPDATE lectures
             SET day = $1, time_slot_id = $2, division_id = $3, type = $4, room_number = $5
             WHERE id = $6
             RETURNING {}",
            LECTURE_COLUMNS
        ))
        .bind(dto.day.unwrap_or(existing.day))
        .bind(dto.time_slot_id.unwrap_or(existing.time_slot_id))
        .bind(dto.division_id.unwrap_or(existing.division_id))
        .bind(dto.lecture_type.unwrap_or(existing.lecture_type))
        .bind(dto.room_number.unwrap_or(existing.room_number))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(lecture.id = %lecture.id, "Lecture updated");
        Ok(lecture)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "lectures"))]
    pub async fn delete_lecture(db: &PgPool, id: LectureId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(lecture_not_found());
        }

        info!(lecture.id = %id, "Lecture deleted");
        Ok(())
    }
}
