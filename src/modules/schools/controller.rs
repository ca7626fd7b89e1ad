use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::permissions::SCHOOL;
use campus_core::{AppError, ListParams};
use campus_models::ids::SchoolId;

use crate::middleware::auth::{AuthUser, RequireSchool};
use crate::modules::professors::model::Professor;
use crate::modules::schools::model::{CreateSchoolDto, School, UpdateSchoolDto};
use crate::modules::schools::service::SchoolService;
use crate::modules::students::model::Student;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/schools",
    params(ListParams),
    responses(
        (status = 200, description = "List of schools", body = Vec<School>),
        (status = 403, description = "Missing the school permission")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_schools(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<School>>, AppError> {
    let schools = SchoolService::list_schools(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(schools))
}

#[utoipa::path(
    post,
    path = "/api/v1/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created", body = School),
        (status = 409, description = "Duplicate name or head"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_school(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = SchoolService::create_school(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

/// Members of a school may read it. Anyone else needs the school permission.
#[utoipa::path(
    get,
    path = "/api/v1/schools/{id}",
    params(("id" = SchoolId, Path, description = "School ID")),
    responses(
        (status = 200, description = "School", body = School),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<SchoolId>,
) -> Result<Json<School>, AppError> {
    if auth_user.user().school_id != Some(id)
        && !auth_user.has_permission(&state.db, SCHOOL).await?
    {
        return Err(AppError::forbidden(
            "The user doesn't have enough privileges".to_string(),
        ));
    }

    let school = SchoolService::get_school(&state.db, id).await?;
    Ok(Json(school))
}

#[utoipa::path(
    put,
    path = "/api/v1/schools/{id}",
    params(("id" = SchoolId, Path, description = "School ID")),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "Updated school", body = School),
        (status = 404, description = "School not found"),
        (status = 409, description = "Duplicate name or head")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_school(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<SchoolId>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::update_school(&state.db, id, dto).await?;
    Ok(Json(school))
}

/// Delete a school. Everything that belongs to it is removed as well.
#[utoipa::path(
    delete,
    path = "/api/v1/schools/{id}",
    params(("id" = SchoolId, Path, description = "School ID")),
    responses(
        (status = 204, description = "School deleted"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_school(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<SchoolId>,
) -> Result<StatusCode, AppError> {
    SchoolService::delete_school(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/schools/{id}/students",
    params(("id" = SchoolId, Path, description = "School ID")),
    responses(
        (status = 200, description = "Students of the school", body = Vec<Student>),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_school_students(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Path(id): Path<SchoolId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = SchoolService::list_students(&state.db, id).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/v1/schools/{id}/professors",
    params(("id" = SchoolId, Path, description = "School ID")),
    responses(
        (status = 200, description = "Professors of the school", body = Vec<Professor>),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_school_professors(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Path(id): Path<SchoolId>,
) -> Result<Json<Vec<Professor>>, AppError> {
    let professors = SchoolService::list_professors(&state.db, id).await?;
    Ok(Json(professors))
}
