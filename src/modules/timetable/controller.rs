use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::ids::DivisionId;

use crate::middleware::auth::{AuthUser, RequireCourse};
use crate::modules::lectures::model::{Lecture, Timetable};
use crate::modules::timetable::service::TimetableService;
use crate::state::AppState;

/// The caller's weekly timetable, keyed by weekday. Only students and
/// professors have one.
#[utoipa::path(
    get,
    path = "/api/v1/timetable",
    responses(
        (status = 200, description = "Lectures grouped by weekday", body = BTreeMap<String, Vec<Lecture>>),
        (status = 400, description = "No timetable for this user type")
    ),
    tag = "Timetable",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn get_my_timetable(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Timetable>, AppError> {
    let timetable = TimetableService::for_user(&state.db, auth_user.user()).await?;
    Ok(Json(timetable))
}

#[utoipa::path(
    get,
    path = "/api/v1/timetable/{division_id}",
    params(("division_id" = DivisionId, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Lectures grouped by weekday", body = BTreeMap<String, Vec<Lecture>>),
        (status = 404, description = "Division not found")
    ),
    tag = "Timetable",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_division_timetable(
    State(state): State<AppState>,
    RequireCourse(_admin): RequireCourse,
    Path(division_id): Path<DivisionId>,
) -> Result<Json<Timetable>, AppError> {
    let timetable = TimetableService::for_division(&state.db, division_id).await?;
    Ok(Json(timetable))
}
