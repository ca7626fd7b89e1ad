use sqlx::PgPool;
use tracing::{info, instrument, warn};

use campus_core::AppError;
use campus_models::ids::UserId;

use crate::modules::divisions::model::Division;
use crate::modules::students::model::{Student, UpdateStudentDto};

pub(crate) const STUDENT_SELECT: &str = "SELECT s.user_id, s.term_id, u.full_name, u.email, u.school_id, u.is_active
     FROM students s
     JOIN users u ON u.id = s.user_id";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn find_student(db: &PgPool, user_id: UserId) -> Result<Option<Student>, AppError> {
        let student =
            sqlx::query_as::<_, Student>(&format!("{} WHERE s.user_id = $1", STUDENT_SELECT))
                .bind(user_id)
                .fetch_optional(db)
                .await?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, user_id: UserId) -> Result<Student, AppError> {
        Self::find_student(db, user_id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The student with this ID does not exist in the system"
            ))
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn list_students(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "{} ORDER BY u.email OFFSET $1 LIMIT $2",
            STUDENT_SELECT
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Divisions the student is enrolled in.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "student_divisions"))]
    pub async fn list_divisions(db: &PgPool, user_id: UserId) -> Result<Vec<Division>, AppError> {
        let divisions = sqlx::query_as::<_, Division>(
            "SELECT d.id, d.course_id, d.division_code, d.professor_id, d.number_of_batches
             FROM divisions d
             JOIN student_divisions sd ON sd.division_id = d.id
             WHERE sd.student_id = $1
             ORDER BY d.course_id, d.division_code",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(divisions)
    }

    /// Moves the student into another term.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let result = sqlx::query("UPDATE students SET term_id = $1 WHERE user_id = $2")
            .bind(dto.term_id)
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    warn!(term.id = %dto.term_id, "Student moved to unknown term");
                    return AppError::not_found(anyhow::anyhow!(
                        "The term with this ID does not exist in the system!"
                    ));
                }
                AppError::database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "This student does not exist!"
            )));
        }

        info!(student.id = %user_id, term.id = %dto.term_id, "Student term updated");
        Self::get_student(db, user_id).await
    }
}
