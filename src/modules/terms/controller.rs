use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use campus_core::{AppError, ListParams};
use campus_models::ids::TermId;

use crate::middleware::auth::RequireTerm;
use crate::modules::terms::model::{CreateTermDto, Term, UpdateTermDto};
use crate::modules::terms::service::TermService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/terms",
    params(ListParams),
    responses(
        (status = 200, description = "List of terms", body = Vec<Term>),
        (status = 403, description = "Missing the term permission")
    ),
    tag = "Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_terms(
    State(state): State<AppState>,
    RequireTerm(_admin): RequireTerm,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Term>>, AppError> {
    let terms = TermService::list_terms(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(terms))
}

#[utoipa::path(
    get,
    path = "/api/v1/terms/{id}",
    params(("id" = TermId, Path, description = "Term ID")),
    responses(
        (status = 200, description = "Term", body = Term),
        (status = 404, description = "Term not found")
    ),
    tag = "Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_term(
    State(state): State<AppState>,
    RequireTerm(_admin): RequireTerm,
    Path(id): Path<TermId>,
) -> Result<Json<Term>, AppError> {
    let term = TermService::get_term(&state.db, id).await?;
    Ok(Json(term))
}

#[utoipa::path(
    post,
    path = "/api/v1/terms",
    request_body = CreateTermDto,
    responses(
        (status = 201, description = "Term created", body = Term),
        (status = 404, description = "Year not found"),
        (status = 409, description = "Duplicate term"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_term(
    State(state): State<AppState>,
    RequireTerm(admin): RequireTerm,
    ValidatedJson(dto): ValidatedJson<CreateTermDto>,
) -> Result<(StatusCode, Json<Term>), AppError> {
    let term = TermService::create_term(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(term)))
}

#[utoipa::path(
    put,
    path = "/api/v1/terms/{id}",
    params(("id" = TermId, Path, description = "Term ID")),
    request_body = UpdateTermDto,
    responses(
        (status = 200, description = "Updated term", body = Term),
        (status = 404, description = "Term not found"),
        (status = 409, description = "Duplicate term")
    ),
    tag = "Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_term(
    State(state): State<AppState>,
    RequireTerm(admin): RequireTerm,
    Path(id): Path<TermId>,
    ValidatedJson(dto): ValidatedJson<UpdateTermDto>,
) -> Result<Json<Term>, AppError> {
    let term = TermService::update_term(&state.db, id, dto).await?;
    Ok(Json(term))
}

#[utoipa::path(
    delete,
    path = "/api/v1/terms/{id}",
    params(("id" = TermId, Path, description = "Term ID")),
    responses(
        (status = 204, description = "Term deleted"),
        (status = 404, description = "Term not found")
    ),
    tag = "Terms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.user.id))]
pub async fn delete_term(
    State(state): State<AppState>,
    RequireTerm(admin): RequireTerm,
    Path(id): Path<TermId>,
) -> Result<StatusCode, AppError> {
    TermService::delete_term(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
