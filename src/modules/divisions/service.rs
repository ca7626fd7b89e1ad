use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{debug, info, instrument, warn};

use campus_core::AppError;
use campus_models::ids::{DivisionId, SchoolId, TermId, UserId};

use crate::modules::divisions::model::{
    BatchAssigner, BulkEnrolmentResponse, CreateDivisionDto, Division, DivisionStudent,
    EnrolmentRejection, UpdateDivisionDto,
};
use crate::modules::students::model::Student;
use crate::modules::students::service::StudentService;
use crate::modules::users::model::UserType;
use crate::modules::users::service::UserService;

pub(crate) const DIVISION_COLUMNS: &str =
    "id, course_id, division_code, professor_id, number_of_batches";

const DIVISION_STUDENT_SELECT: &str = "SELECT s.user_id, s.term_id, u.full_name, u.email, u.school_id, u.is_active, sd.batch_number
     FROM student_divisions sd
     JOIN students s ON s.user_id = sd.student_id
     JOIN users u ON u.id = s.user_id";

/// Where a division sits in the academic hierarchy.
#[derive(Debug, FromRow)]
struct DivisionPlacement {
    number_of_batches: i32,
    term_id: TermId,
    school_id: SchoolId,
}

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "The division with these details already exists in the system!"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!(
                "The course or professor for this division does not exist in the system!"
            ));
        }
    }
    AppError::database(e)
}

fn division_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "The division with this ID does not exist in the system!"
    ))
}

pub struct DivisionService;

impl DivisionService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "divisions"))]
    pub async fn list_divisions(
        db: &PgPool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Division>, AppError> {
        let divisions = sqlx::query_as::<_, Division>(&format!(
            "SELECT {} FROM divisions ORDER BY course_id, division_code OFFSET $1 LIMIT $2",
            DIVISION_COLUMNS
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(divisions)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "divisions"))]
    pub async fn find_division(db: &PgPool, id: DivisionId) -> Result<Option<Division>, AppError> {
        let division = sqlx::query_as::<_, Division>(&format!(
            "SELECT {} FROM divisions WHERE id = $1",
            DIVISION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(division)
    }

    #[instrument(skip(db))]
    pub async fn get_division(db: &PgPool, id: DivisionId) -> Result<Division, AppError> {
        Self::find_division(db, id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The division with this ID does not exist!"
            ))
        })
    }

    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.operation = "INSERT", db.table = "divisions"))]
    pub async fn create_division(db: &PgPool, dto: CreateDivisionDto) -> Result<Division, AppError> {
        let division = sqlx::query_as::<_, Division>(&format!(
            "INSERT INTO divisions (course_id, division_code, professor_id, number_of_batches)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            DIVISION_COLUMNS
        ))
        .bind(dto.course_id)
        .bind(dto.division_code)
        .bind(dto.professor_id)
        .bind(dto.number_of_batches)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(division.id = %division.id, division.code = division.division_code, "Division created");
        Ok(division)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "divisions"))]
    pub async fn update_division(
        db: &PgPool,
        id: DivisionId,
        dto: UpdateDivisionDto,
    ) -> Result<Division, AppError> {
        let existing = Self::find_division(db, id).await?.ok_or_else(division_not_found)?;

        let division = sqlx::query_as::<_, Division>(&format!(
            "UPDATE divisions SET division_code = $1, professor_id = $2, number_of_batches = $3
             WHERE id = $4
             RETURNING {}",
            DIVISION_COLUMNS
        ))
        .bind(dto.division_code.unwrap_or(existing.division_code))
        .bind(dto.professor_id.unwrap_or(existing.professor_id))
        .bind(dto.number_of_batches.unwrap_or(existing.number_of_batches))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(write_error)?;

        info!(division.id = %division.id, "Division updated");
        Ok(division)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "divisions"))]
    pub async fn delete_division(db: &PgPool, id: DivisionId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM divisions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(division_not_found());
        }

        info!(division.id = %id, "Division deleted");
        Ok(())
    }

    /// Students of the division, optionally restricted to one batch.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "student_divisions"))]
    pub async fn list_students(
        db: &PgPool,
        id: DivisionId,
        batch_number: Option<i32>,
    ) -> Result<Vec<DivisionStudent>, AppError> {
        let students = sqlx::query_as::<_, DivisionStudent>(&format!(
            "{} WHERE sd.division_id = $1 AND ($2::INTEGER IS NULL OR sd.batch_number = $2)
             ORDER BY sd.batch_number, u.email",
            DIVISION_STUDENT_SELECT
        ))
        .bind(id)
        .bind(batch_number)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Adds one student to the division's join table.
    pub async fn add_student(
        conn: &mut PgConnection,
        division_id: DivisionId,
        student_id: UserId,
        batch_number: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO student_divisions (student_id, division_id, batch_number)
             VALUES ($1, $2, $3)",
        )
        .bind(student_id)
        .bind(division_id)
        .bind(batch_number)
        .execute(conn)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(student.id = %student_id, "Student already enrolled in division");
                return AppError::conflict(anyhow::anyhow!(
                    "Student with id {} is already enrolled in Division with id {}",
                    student_id,
                    division_id
                ));
            }
            AppError::database(e)
        })?;
        Ok(())
    }

    /// Enrols every eligible user and reports the rest grouped by reason.
    ///
    /// A user is eligible when they are a student of the division's school with
    /// a student row in the division's term. Accepted students are written in a
    /// single transaction, so an integrity error (for example a student who is
    /// already enrolled) rejects the whole request with 409.
    #[instrument(skip(db, user_ids), fields(division.id = %id, request.size = user_ids.len()))]
    pub async fn enrol_students(
        db: &PgPool,
        id: DivisionId,
        user_ids: Vec<UserId>,
    ) -> Result<BulkEnrolmentResponse, AppError> {
        let placement = sqlx::query_as::<_, DivisionPlacement>(
            "SELECT d.number_of_batches, c.term_id, y.school_id
             FROM divisions d
             JOIN courses c ON c.id = d.course_id
             JOIN terms t ON t.id = c.term_id
             JOIN years y ON y.id = t.year_id
             WHERE d.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("The division with this ID does not exist!"))
        })?;

        let mut response = BulkEnrolmentResponse::default();
        let mut accepted = Vec::new();

        for user_id in user_ids {
            match Self::check_eligibility(db, user_id, &placement).await? {
                Ok(()) => accepted.push(user_id),
                Err(rejection) => {
                    debug!(user.id = %user_id, reason = rejection.reason(), "Enrolment rejected");
                    response.reject(user_id, rejection);
                }
            }
        }

        let mut batches = BatchAssigner::new(placement.number_of_batches);
        let mut tx = db.begin().await?;

        for student_id in accepted {
            Self::add_student(&mut tx, id, student_id, batches.next_batch()).await?;
            response.success.push(student_id);
        }

        tx.commit().await?;

        info!(
            division.id = %id,
            enrolled = response.success.len(),
            rejected = response.errors.values().map(Vec::len).sum::<usize>(),
            "Bulk enrolment finished"
        );
        Ok(response)
    }

    async fn check_eligibility(
        db: &PgPool,
        user_id: UserId,
        placement: &DivisionPlacement,
    ) -> Result<Result<(), EnrolmentRejection>, AppError> {
        let Some(user) = UserService::find_user(db, user_id).await? else {
            return Ok(Err(EnrolmentRejection::NotAUser));
        };
        if user.user_type != UserType::Student {
            return Ok(Err(EnrolmentRejection::NotAStudent));
        }
        if user.school_id != Some(placement.school_id) {
            return Ok(Err(EnrolmentRejection::DifferentSchools));
        }
        let Some(student) = StudentService::find_student(db, user_id).await? else {
            return Ok(Err(EnrolmentRejection::NoStudentObject));
        };
        if student.term_id != Some(placement.term_id) {
            return Ok(Err(EnrolmentRejection::DifferentTerms));
        }
        Ok(Ok(()))
    }

    /// Removes a student from the division and returns them.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "student_divisions"))]
    pub async fn remove_student(
        db: &PgPool,
        id: DivisionId,
        student_id: UserId,
    ) -> Result<Student, AppError> {
        if Self::find_division(db, id).await?.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Division with id {} not found",
                id
            )));
        }

        let student = StudentService::find_student(db, student_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow::anyhow!("Student with id {} not found", student_id))
            })?;

        let result =
            sqlx::query("DELETE FROM student_divisions WHERE student_id = $1 AND division_id = $2")
                .bind(student_id)
                .bind(id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Student with id {} not found in Division with id {}",
                student_id,
                id
            )));
        }

        info!(division.id = %id, student.id = %student_id, "Student removed from division");
        Ok(student)
    }
}
