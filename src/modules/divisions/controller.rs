use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::permissions::COURSE;
use campus_core::{AppError, ListParams};
use campus_models::ids::{DivisionId, UserId};

use crate::middleware::auth::{AuthUser, RequireCourse, RequireTerm};
use crate::modules::divisions::model::{
    BulkEnrolmentResponse, CreateDivisionDto, Division, DivisionStudent, UpdateDivisionDto,
};
use crate::modules::divisions::service::DivisionService;
use crate::modules::students::model::Student;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson};

/// The division's professor, or an admin holding the course permission.
async fn ensure_can_read_students(
    state: &AppState,
    auth_user: &AuthUser,
    id: DivisionId,
) -> Result<(), AppError> {
    let division = DivisionService::find_division(&state.db, id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The division with this ID does not exist in the system"
            ))
        })?;

    if division.professor_id == auth_user.user_id()
        || auth_user.has_permission(&state.db, COURSE).await?
    {
        return Ok(());
    }

    Err(AppError::forbidden(
        "The user doesn't have enough privileges".to_string(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/divisions",
    params(ListParams),
    responses(
        (status = 200, description = "List of divisions", body = Vec<Division>),
        (status = 403, description = "Missing the course permission")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_divisions(
    State(state): State<AppState>,
    RequireCourse(_admin): RequireCourse,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Division>>, AppError> {
    let divisions =
        DivisionService::list_divisions(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(divisions))
}

#[utoipa::path(
    get,
    path = "/api/v1/divisions/{id}",
    params(("id" = DivisionId, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Division", body = Division),
        (status = 404, description = "Division not found")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_division(
    State(state): State<AppState>,
    RequireCourse(_admin): RequireCourse,
    Path(id): Path<DivisionId>,
) -> Result<Json<Division>, AppError> {
    let division = DivisionService::get_division(&state.db, id).await?;
    Ok(Json(division))
}

#[utoipa::path(
    post,
    path = "/api/v1/divisions",
    request_body = CreateDivisionDto,
    responses(
        (status = 201, description = "Division created", body = Division),
        (status = 404, description = "Course or professor not found"),
        (status = 409, description = "Duplicate division code for the course")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_division(
    State(state): State<AppState>,
    RequireCourse(admin): RequireCourse,
    ValidatedJson(dto): ValidatedJson<CreateDivisionDto>,
) -> Result<(StatusCode, Json<Division>), AppError> {
    let division = DivisionService::create_division(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(division)))
}

#[utoipa::path(
    put,
    path = "/api/v1/divisions/{id}",
    params(("id" = DivisionId, Path, description = "Division ID")),
    request_body = UpdateDivisionDto,
    responses(
        (status = 200, description = "Updated division", body = Division),
        (status = 404, description = "Division not found"),
        (status = 409, description = "Duplicate division code for the course")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_division(
    State(state): State<AppState>,
    RequireCourse(admin): RequireCourse,
    Path(id): Path<DivisionId>,
    ValidatedJson(dto): ValidatedJson<UpdateDivisionDto>,
) -> Result<Json<Division>, AppError> {
    let division = DivisionService::update_division(&state.db, id, dto).await?;
    Ok(Json(division))
}

#[utoipa::path(
    delete,
    path = "/api/v1/divisions/{id}",
    params(("id" = DivisionId, Path, description = "Division ID")),
    responses(
        (status = 204, description = "Division deleted"),
        (status = 404, description = "Division not found")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_division(
    State(state): State<AppState>,
    RequireCourse(admin): RequireCourse,
    Path(id): Path<DivisionId>,
) -> Result<StatusCode, AppError> {
    DivisionService::delete_division(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/divisions/{id}/students",
    params(("id" = DivisionId, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Students with their batch", body = Vec<DivisionStudent>),
        (status = 403, description = "Not the division's professor or a course admin"),
        (status = 404, description = "Division not found")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn list_division_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DivisionId>,
) -> Result<Json<Vec<DivisionStudent>>, AppError> {
    ensure_can_read_students(&state, &auth_user, id).await?;
    let students = DivisionService::list_students(&state.db, id, None).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/v1/divisions/{id}/students/{batch_number}",
    params(
        ("id" = DivisionId, Path, description = "Division ID"),
        ("batch_number" = i32, Path, description = "Batch number, starting at 1")
    ),
    responses(
        (status = 200, description = "Students of the batch", body = Vec<DivisionStudent>),
        (status = 403, description = "Not the division's professor or a course admin"),
        (status = 404, description = "Division not found")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn list_batch_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, batch_number)): Path<(DivisionId, i32)>,
) -> Result<Json<Vec<DivisionStudent>>, AppError> {
    ensure_can_read_students(&state, &auth_user, id).await?;
    let students = DivisionService::list_students(&state.db, id, Some(batch_number)).await?;
    Ok(Json(students))
}

/// Enrol a list of users. Eligible students are assigned batches round-robin;
/// the others are reported under `errors`, keyed by the reason.
#[utoipa::path(
    post,
    path = "/api/v1/divisions/{id}/students",
    params(("id" = DivisionId, Path, description = "Division ID")),
    request_body = Vec<UserId>,
    responses(
        (status = 207, description = "Per-user enrolment result", body = BulkEnrolmentResponse),
        (status = 404, description = "Division not found"),
        (status = 409, description = "A student is already enrolled")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, user_ids), fields(admin.id = %admin.user.id))]
pub async fn enrol_students(
    State(state): State<AppState>,
    RequireCourse(admin): RequireCourse,
    Path(id): Path<DivisionId>,
    JsonBody(user_ids): JsonBody<Vec<UserId>>,
) -> Result<(StatusCode, Json<BulkEnrolmentResponse>), AppError> {
    let response = DivisionService::enrol_students(&state.db, id, user_ids).await?;
    Ok((StatusCode::MULTI_STATUS, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/divisions/{id}/students/{student_id}",
    params(
        ("id" = DivisionId, Path, description = "Division ID"),
        ("student_id" = UserId, Path, description = "Student user ID")
    ),
    responses(
        (status = 200, description = "Removed student", body = Student),
        (status = 403, description = "Missing the term permission"),
        (status = 404, description = "Division, student or enrolment not found")
    ),
    tag = "Divisions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn remove_student(
    State(state): State<AppState>,
    RequireTerm(admin): RequireTerm,
    Path((id, student_id)): Path<(DivisionId, UserId)>,
) -> Result<Json<Student>, AppError> {
    let student = DivisionService::remove_student(&state.db, id, student_id).await?;
    Ok(Json(student))
}
