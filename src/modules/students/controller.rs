use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use campus_core::permissions::STUDENT;
use campus_core::{AppError, ListParams};
use campus_models::ids::UserId;

use crate::middleware::auth::{AuthUser, CurrentStudent, RequireStudent};
use crate::modules::divisions::model::Division;
use crate::modules::students::model::{Student, UpdateStudentDto};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(ListParams),
    responses(
        (status = 200, description = "List of students", body = Vec<Student>),
        (status = 403, description = "Missing the student permission")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_students(
    State(state): State<AppState>,
    RequireStudent(_admin): RequireStudent,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/me",
    responses(
        (status = 200, description = "Current student", body = Student),
        (status = 403, description = "User is not a student")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_my_student(current: CurrentStudent) -> Json<Student> {
    Json(current.student)
}

#[utoipa::path(
    get,
    path = "/api/v1/students/me/divisions",
    responses(
        (status = 200, description = "Divisions of the current student", body = Vec<Division>),
        (status = 403, description = "User is not a student")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(student.id = %current.user.id))]
pub async fn get_my_divisions(
    State(state): State<AppState>,
    current: CurrentStudent,
) -> Result<Json<Vec<Division>>, AppError> {
    let divisions = StudentService::list_divisions(&state.db, current.user.id).await?;
    Ok(Json(divisions))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = UserId, Path, description = "Student user ID")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<Student>, AppError> {
    auth_user
        .ensure_self_or_permission(&state.db, id, STUDENT)
        .await?;

    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/divisions",
    params(("id" = UserId, Path, description = "Student user ID")),
    responses(
        (status = 200, description = "Divisions of the student", body = Vec<Division>),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_student_divisions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Division>>, AppError> {
    auth_user
        .ensure_self_or_permission(&state.db, id, STUDENT)
        .await?;

    StudentService::get_student(&state.db, id).await?;
    let divisions = StudentService::list_divisions(&state.db, id).await?;
    Ok(Json(divisions))
}

/// Move a student into a term.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = UserId, Path, description = "Student user ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 404, description = "Student or term not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_student(
    State(state): State<AppState>,
    RequireStudent(admin): RequireStudent,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}
