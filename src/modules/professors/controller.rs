use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use campus_core::permissions::PROFESSOR;
use campus_core::{AppError, ListParams};
use campus_models::ids::UserId;

use crate::middleware::auth::{AuthUser, CurrentProfessor, RequireProfessor};
use crate::modules::divisions::model::Division;
use crate::modules::professors::model::{Professor, UpdateProfessorDto};
use crate::modules::professors::service::ProfessorService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/professors",
    params(ListParams),
    responses(
        (status = 200, description = "List of professors", body = Vec<Professor>),
        (status = 403, description = "Missing the professor permission")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_professors(
    State(state): State<AppState>,
    RequireProfessor(_admin): RequireProfessor,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Professor>>, AppError> {
    let professors =
        ProfessorService::list_professors(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(professors))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/me",
    responses(
        (status = 200, description = "Current professor", body = Professor),
        (status = 403, description = "User is not a professor")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn get_my_professor(current: CurrentProfessor) -> Json<Professor> {
    Json(current.professor)
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/me/divisions",
    responses(
        (status = 200, description = "Divisions taught by the current professor", body = Vec<Division>),
        (status = 403, description = "User is not a professor")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(professor.id = %current.user.id))]
pub async fn get_my_divisions(
    State(state): State<AppState>,
    current: CurrentProfessor,
) -> Result<Json<Vec<Division>>, AppError> {
    let divisions = ProfessorService::list_divisions(&state.db, current.user.id).await?;
    Ok(Json(divisions))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/{id}",
    params(("id" = UserId, Path, description = "Professor user ID")),
    responses(
        (status = 200, description = "Professor", body = Professor),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_professor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<Professor>, AppError> {
    auth_user
        .ensure_self_or_permission(&state.db, id, PROFESSOR)
        .await?;

    let professor = ProfessorService::get_professor(&state.db, id).await?;
    Ok(Json(professor))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/{id}/divisions",
    params(("id" = UserId, Path, description = "Professor user ID")),
    responses(
        (status = 200, description = "Divisions taught by the professor", body = Vec<Division>),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_professor_divisions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Division>>, AppError> {
    auth_user
        .ensure_self_or_permission(&state.db, id, PROFESSOR)
        .await?;

    ProfessorService::get_professor(&state.db, id).await?;
    let divisions = ProfessorService::list_divisions(&state.db, id).await?;
    Ok(Json(divisions))
}

#[utoipa::path(
    put,
    path = "/api/v1/professors/{id}",
    params(("id" = UserId, Path, description = "Professor user ID")),
    request_body = UpdateProfessorDto,
    responses(
        (status = 200, description = "Updated professor", body = Professor),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_professor(
    State(state): State<AppState>,
    RequireProfessor(admin): RequireProfessor,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateProfessorDto>,
) -> Result<Json<Professor>, AppError> {
    let professor = ProfessorService::update_professor(&state.db, id, dto).await?;
    Ok(Json(professor))
}
