use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::{AppError, ListParams};
use campus_models::ids::{DivisionId, LectureId};

use crate::middleware::auth::{AuthUser, RequireSchool};
use crate::modules::divisions::service::DivisionService;
use crate::modules::lectures::model::{CreateLectureDto, Lecture, UpdateLectureDto};
use crate::modules::lectures::service::LectureService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/lectures",
    params(ListParams),
    responses(
        (status = 200, description = "List of lectures", body = Vec<Lecture>),
        (status = 403, description = "Missing the school permission")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_lectures(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lecture>>, AppError> {
    let lectures = LectureService::list_lectures(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(lectures))
}

#[utoipa::path(
    get,
    path = "/api/v1/lectures/{id}",
    params(("id" = LectureId, Path, description = "Lecture ID")),
    responses(
        (status = 200, description = "Lecture", body = Lecture),
        (status = 404, description = "Lecture not found")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_lecture(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Path(id): Path<LectureId>,
) -> Result<Json<Lecture>, AppError> {
    let lecture = LectureService::get_lecture(&state.db, id).await?;
    Ok(Json(lecture))
}

/// Lectures of one division. Open to any signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/lectures/division/{id}",
    params(("id" = DivisionId, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Lectures of the division", body = Vec<Lecture>),
        (status = 404, description = "Division not found")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_division_lectures(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DivisionId>,
) -> Result<Json<Vec<Lecture>>, AppError> {
    if DivisionService::find_division(&state.db, id).await?.is_none() {
        return Err(AppError::not_found(anyhow::anyhow!(
            "A division with this ID does not exist!"
        )));
    }

    let lectures = LectureService::list_for_divisions(&state.db, &[id]).await?;
    Ok(Json(lectures))
}

/// Schedule a lecture. `day` is a weekday name such as `Monday` and `type`
/// one of `theory`, `practical` or `tutorial`.
#[utoipa::path(
    post,
    path = "/api/v1/lectures",
    request_body = CreateLectureDto,
    responses(
        (status = 201, description = "Lecture created", body = Lecture),
        (status = 404, description = "Timeslot or division not found"),
        (status = 409, description = "Duplicate lecture"),
        (status = 422, description = "Invalid day or lecture type")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_lecture(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    ValidatedJson(dto): ValidatedJson<CreateLectureDto>,
) -> Result<(StatusCode, Json<Lecture>), AppError> {
    let lecture = LectureService::create_lecture(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lecture)))
}

#[utoipa::path(
    put,
    path = "/api/v1/lectures/{id}",
    params(("id" = LectureId, Path, description = "Lecture ID")),
    request_body = UpdateLectureDto,
    responses(
        (status = 200, description = "Updated lecture", body = Lecture),
        (status = 404, description = "Lecture not found"),
        (status = 409, description = "Duplicate lecture"),
        (status = 422, description = "Invalid day or lecture type")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_lecture(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<LectureId>,
    ValidatedJson(dto): ValidatedJson<UpdateLectureDto>,
) -> Result<Json<Lecture>, AppError> {
    let lecture = LectureService::update_lecture(&state.db, id, dto).await?;
    Ok(Json(lecture))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lectures/{id}",
    params(("id" = LectureId, Path, description = "Lecture ID")),
    responses(
        (status = 204, description = "Lecture deleted"),
        (status = 404, description = "Lecture not found")
    ),
    tag = "Lectures",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_lecture(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<LectureId>,
) -> Result<StatusCode, AppError> {
    LectureService::delete_lecture(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
