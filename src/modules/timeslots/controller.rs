use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::{AppError, ListParams};
use campus_models::ids::TimeslotId;

use crate::middleware::auth::RequireSchool;
use crate::modules::timeslots::model::{CreateTimeslotDto, Timeslot, UpdateTimeslotDto};
use crate::modules::timeslots::service::TimeslotService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/timeslots",
    params(ListParams),
    responses(
        (status = 200, description = "List of timeslots", body = Vec<Timeslot>),
        (status = 403, description = "Missing the school permission")
    ),
    tag = "Timeslots",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_timeslots(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Timeslot>>, AppError> {
    let timeslots =
        TimeslotService::list_timeslots(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(timeslots))
}

#[utoipa::path(
    get,
    path = "/api/v1/timeslots/{id}",
    params(("id" = TimeslotId, Path, description = "Timeslot ID")),
    responses(
        (status = 200, description = "Timeslot", body = Timeslot),
        (status = 404, description = "Timeslot not found")
    ),
    tag = "Timeslots",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_timeslot(
    State(state): State<AppState>,
    RequireSchool(_admin): RequireSchool,
    Path(id): Path<TimeslotId>,
) -> Result<Json<Timeslot>, AppError> {
    let timeslot = TimeslotService::get_timeslot(&state.db, id).await?;
    Ok(Json(timeslot))
}

#[utoipa::path(
    post,
    path = "/api/v1/timeslots",
    request_body = CreateTimeslotDto,
    responses(
        (status = 201, description = "Timeslot created", body = Timeslot),
        (status = 409, description = "Duplicate timeslot"),
        (status = 422, description = "Timeslot ends before it begins")
    ),
    tag = "Timeslots",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_timeslot(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    ValidatedJson(dto): ValidatedJson<CreateTimeslotDto>,
) -> Result<(StatusCode, Json<Timeslot>), AppError> {
    let timeslot = TimeslotService::create_timeslot(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(timeslot)))
}

#[utoipa::path(
    put,
    path = "/api/v1/timeslots/{id}",
    params(("id" = TimeslotId, Path, description = "Timeslot ID")),
    request_body = UpdateTimeslotDto,
    responses(
        (status = 200, description = "Updated timeslot", body = Timeslot),
        (status = 404, description = "Timeslot not found"),
        (status = 409, description = "Duplicate timeslot"),
        (status = 422, description = "Timeslot ends before it begins")
    ),
    tag = "Timeslots",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_timeslot(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<TimeslotId>,
    ValidatedJson(dto): ValidatedJson<UpdateTimeslotDto>,
) -> Result<Json<Timeslot>, AppError> {
    let timeslot = TimeslotService::update_timeslot(&state.db, id, dto).await?;
    Ok(Json(timeslot))
}

#[utoipa::path(
    delete,
    path = "/api/v1/timeslots/{id}",
    params(("id" = TimeslotId, Path, description = "Timeslot ID")),
    responses(
        (status = 204, description = "Timeslot deleted"),
        (status = 404, description = "Timeslot not found")
    ),
    tag = "Timeslots",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_timeslot(
    State(state): State<AppState>,
    RequireSchool(admin): RequireSchool,
    Path(id): Path<TimeslotId>,
) -> Result<StatusCode, AppError> {
    TimeslotService::delete_timeslot(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
