use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::{info, instrument, warn};

use campus_core::file_storage::{FileStorage, UploadPolicy};
use campus_core::permissions::{ADMIN, USER};
use campus_core::{AppError, ListParams};
use campus_models::ids::UserId;

use crate::middleware::auth::{AuthUser, RequireUser};
use crate::modules::users::model::{
    CreateUserDto, UpdateMeDto, UpdateUserDto, User, UserType,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::upload::{read_file_field, store_upload};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListParams),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 403, description = "Missing the user permission")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(_admin): RequireUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::list_users(&state.db, params.skip(), params.limit()).await?;
    Ok(Json(users))
}

/// Create a new account. Only superusers may create other superusers.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 403, description = "Missing permission or superuser required"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn create_user(
    State(state): State<AppState>,
    RequireUser(admin): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if dto.user_type == UserType::Superuser && !admin.user.is_superuser() {
        return Err(AppError::forbidden(
            "Only superusers can create more superusers.".to_string(),
        ));
    }

    let user = UserService::create_user(&state.db, dto).await?;

    let email_service = EmailService::new(state.email_config.clone(), &state.app_config);
    if email_service.is_enabled()
        && let Err(e) = email_service
            .send_new_account_email(&user.email, &user.email)
            .await
    {
        warn!(error = %e.error, user.id = %user.id, "Failed to send new account email");
    }

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// Update own email, password or name.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateMeDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateMeDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(&state.db, auth_user.user_id(), dto.into()).await?;
    Ok(Json(user))
}

/// Fetch a user. Users may always read themselves; anyone else needs the
/// admin permission.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = UserId, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    if auth_user.user_id() == id {
        return Ok(Json(auth_user.0));
    }

    if !auth_user.has_permission(&state.db, ADMIN).await? {
        return Err(AppError::forbidden(
            "The user doesn't have enough privileges".to_string(),
        ));
    }

    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// Update a user. Roles cannot be changed here, and only professors can gain
/// or lose admin rights.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = UserId, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Role change rejected"),
        (status = 403, description = "Missing the user permission"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.user.id))]
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(admin): RequireUser,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::find_user(&state.db, id).await?.ok_or_else(|| {
        AppError::not_found(anyhow::anyhow!(
            "The user with this id does not exist in the system"
        ))
    })?;

    if dto.user_type.is_some() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "User roles cannot be changed"
        )));
    }

    if dto.is_admin.is_some() && user.user_type != UserType::Professor {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "A {} cannot have admin roles changed!",
            user.user_type
        )));
    }

    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

/// Upload a PNG or JPEG profile picture as the multipart field `image`.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/profile_picture",
    params(("id" = UserId, Path, description = "User ID")),
    request_body(content_type = "multipart/form-data", description = "Multipart form with an `image` field"),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Not enough privileges"),
        (status = 404, description = "User not found"),
        (status = 415, description = "Not a PNG or JPEG image")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn update_profile_picture(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    mut multipart: Multipart,
) -> Result<Json<User>, AppError> {
    auth_user
        .ensure_self_or_permission(&state.db, id, USER)
        .await?;

    let image = read_file_field(&mut multipart, "image").await?;
    let policy = UploadPolicy::profile_picture();
    let key = store_upload(
        &state.storage,
        &policy,
        &image,
        "Profile pictures can only be PNG or JPG images",
    )
    .await?;

    let (user, previous) = match UserService::set_profile_picture(&state.db, id, &key).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Err(delete_err) = state.storage.delete(&key).await {
                warn!(error = %delete_err, storage.key = %key, "Failed to clean up upload");
            }
            return Err(e);
        }
    };

    if let Some(previous) = previous
        && let Err(e) = state.storage.delete(&previous).await
    {
        warn!(error = %e, storage.key = %previous, "Failed to delete old profile picture");
    }

    info!(user.id = %user.id, storage.key = %key, "Profile picture updated");
    Ok(Json(user))
}
