use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use campus_core::AppError;
use campus_models::ids::DivisionId;

use crate::modules::divisions::model::Division;
use crate::modules::divisions::service::DivisionService;
use crate::modules::lectures::model::{Lecture, Timetable, Weekday};
use crate::modules::lectures::service::LectureService;
use crate::modules::professors::service::ProfessorService;
use crate::modules::students::service::StudentService;
use crate::modules::users::model::{User, UserType};

/// Groups lectures by weekday, keeping their order within a day.
pub fn build_timetable(lectures: Vec<Lecture>) -> Timetable {
    let mut timetable = Timetable::new();
    for lecture in lectures {
        match lecture.day.parse::<Weekday>() {
            Ok(day) => timetable.entry(day).or_default().push(lecture),
            Err(e) => warn!(lecture.id = %lecture.id, error = %e, "Skipping lecture"),
        }
    }
    timetable
}

pub struct TimetableService;

impl TimetableService {
    /// Timetable of the divisions a student attends or a professor teaches.
    #[instrument(skip(db, user), fields(user.id = %user.id, user.role = %user.user_type))]
    pub async fn for_user(db: &PgPool, user: &User) -> Result<Timetable, AppError> {
        let no_timetable = || {
            AppError::bad_request(anyhow::anyhow!(
                "No timetable can be generated for user type {}",
                user.user_type
            ))
        };

        let divisions = match user.user_type {
            UserType::Student => {
                StudentService::find_student(db, user.id)
                    .await?
                    .ok_or_else(no_timetable)?;
                StudentService::list_divisions(db, user.id).await?
            }
            UserType::Professor => {
                ProfessorService::find_professor(db, user.id)
                    .await?
                    .ok_or_else(no_timetable)?;
                ProfessorService::list_divisions(db, user.id).await?
            }
            UserType::Admin | UserType::Superuser => return Err(no_timetable()),
        };

        Self::for_divisions(db, &divisions).await
    }

    #[instrument(skip(db))]
    pub async fn for_division(db: &PgPool, id: DivisionId) -> Result<Timetable, AppError> {
        let division = DivisionService::find_division(db, id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow::anyhow!("Division with id {} not found", id))
            })?;

        Self::for_divisions(db, &[division]).await
    }

    async fn for_divisions(db: &PgPool, divisions: &[Division]) -> Result<Timetable, AppError> {
        let ids: Vec<DivisionId> = divisions.iter().map(|division| division.id).collect();
        let lectures = LectureService::list_for_divisions(db, &ids).await?;
        debug!(divisions = ids.len(), lectures = lectures.len(), "Building timetable");
        Ok(build_timetable(lectures))
    }
}
