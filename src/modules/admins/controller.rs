use axum::{Json, extract::State, http::StatusCode};
use tracing::{instrument, warn};

use campus_core::AppError;

use crate::middleware::auth::{CurrentAdmin, RequireAdmin};
use crate::modules::admins::model::{Admin, CreateAdminDto, RemoveAdminDto, UpdateAdminDto};
use crate::modules::admins::service::AdminService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

/// The caller's own admin row.
#[utoipa::path(
    get,
    path = "/api/v1/admins",
    responses(
        (status = 200, description = "Current admin", body = Admin),
        (status = 403, description = "User is not an administrator"),
        (status = 404, description = "Admin object not found")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
pub async fn get_current_admin(current: CurrentAdmin) -> Json<Admin> {
    Json(current.admin)
}

/// Promote a professor to admin.
#[utoipa::path(
    post,
    path = "/api/v1/admins",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = Admin),
        (status = 400, description = "User is not a professor"),
        (status = 404, description = "User does not exist"),
        (status = 409, description = "User is already an admin")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(admin.id = %current.user.id))]
pub async fn promote_admin(
    State(state): State<AppState>,
    RequireAdmin(current): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    let (admin, user) = AdminService::promote(&state.db, dto).await?;

    let email_service = EmailService::new(state.email_config.clone(), &state.app_config);
    if email_service.is_enabled() {
        let name = user.full_name.as_deref().unwrap_or(&user.email);
        if let Err(e) = email_service.send_new_admin_email(&user.email, name).await {
            warn!(error = %e.error, user.id = %user.id, "Failed to send new admin email");
        }
    }

    Ok((StatusCode::CREATED, Json(admin)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admins",
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Admin updated", body = Admin),
        (status = 404, description = "Admin does not exist")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(admin.id = %current.user.id))]
pub async fn update_admin(
    State(state): State<AppState>,
    RequireAdmin(current): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<UpdateAdminDto>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::update_permissions(&state.db, dto).await?;
    Ok(Json(admin))
}

/// Demote an admin back to a plain professor.
#[utoipa::path(
    delete,
    path = "/api/v1/admins",
    request_body = RemoveAdminDto,
    responses(
        (status = 200, description = "Removed admin row", body = Admin),
        (status = 404, description = "User or admin does not exist")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(admin.id = %current.user.id))]
pub async fn demote_admin(
    State(state): State<AppState>,
    RequireAdmin(current): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<RemoveAdminDto>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::demote(&state.db, dto.user_id).await?;
    Ok(Json(admin))
}
