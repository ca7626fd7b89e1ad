use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::{AppError, ListParams};
use campus_models::ids::YearId;

use crate::middleware::auth::RequireYear;
use crate::modules::years::model::{CreateYearDto, UpdateYearDto, Year};
use crate::modules::years::service::YearService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/years",
    params(ListParams),
    responses(
        (status = 200, description = "List of years", body = Vec<Year>),
        (status = 403, description = "Missing the year permission")
    ),
    tag = "Years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_years(
    State(state): State<AppState>,
    RequireYear(_admin): RequireYear,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Year>>, AppError> {
    let years = YearService::list_years(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(years))
}

#[utoipa::path(
    get,
    path = "/api/v1/years/{id}",
    params(("id" = YearId, Path, description = "Year ID")),
    responses(
        (status = 200, description = "Year", body = Year),
        (status = 404, description = "Year not found")
    ),
    tag = "Years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_year(
    State(state): State<AppState>,
    RequireYear(_admin): RequireYear,
    Path(id): Path<YearId>,
) -> Result<Json<Year>, AppError> {
    let year = YearService::get_year(&state.db, id).await?;
    Ok(Json(year))
}

#[utoipa::path(
    post,
    path = "/api/v1/years",
    request_body = CreateYearDto,
    responses(
        (status = 201, description = "Year created", body = Year),
        (status = 404, description = "School not found"),
        (status = 409, description = "Duplicate year"),
        (status = 422, description = "Year ends before it starts")
    ),
    tag = "Years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_year(
    State(state): State<AppState>,
    RequireYear(admin): RequireYear,
    ValidatedJson(dto): ValidatedJson<CreateYearDto>,
) -> Result<(StatusCode, Json<Year>), AppError> {
    let year = YearService::create_year(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

#[utoipa::path(
    put,
    path = "/api/v1/years/{id}",
    params(("id" = YearId, Path, description = "Year ID")),
    request_body = UpdateYearDto,
    responses(
        (status = 200, description = "Updated year", body = Year),
        (status = 404, description = "Year not found"),
        (status = 409, description = "Duplicate year"),
        (status = 422, description = "Year ends before it starts")
    ),
    tag = "Years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_year(
    State(state): State<AppState>,
    RequireYear(admin): RequireYear,
    Path(id): Path<YearId>,
    ValidatedJson(dto): ValidatedJson<UpdateYearDto>,
) -> Result<Json<Year>, AppError> {
    let year = YearService::update_year(&state.db, id, dto).await?;
    Ok(Json(year))
}

#[utoipa::path(
    delete,
    path = "/api/v1/years/{id}",
    params(("id" = YearId, Path, description = "Year ID")),
    responses(
        (status = 204, description = "Year deleted"),
        (status = 404, description = "Year not found")
    ),
    tag = "Years",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_year(
    State(state): State<AppState>,
    RequireYear(admin): RequireYear,
    Path(id): Path<YearId>,
) -> Result<StatusCode, AppError> {
    YearService::delete_year(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
