use axum::{
    Form, Json,
    extract::{Path, State},
    http::HeaderMap,
};
use tracing::instrument;

use campus_core::AppError;

use crate::middleware::auth::{AuthUser, bearer_token};
use crate::modules::login::model::{
    LoginForm, MessageResponse, ResetPasswordRequest, TokenResponse,
};
use crate::modules::login::service::LoginService;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

/// OAuth2 compatible password login. `username` is the account email.
#[utoipa::path(
    post,
    path = "/api/v1/login/access-token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token pair", body = TokenResponse),
        (status = 400, description = "Inactive user"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "Login"
)]
#[instrument(skip(state, form), fields(user.email = %form.username))]
pub async fn login_access_token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens =
        LoginService::login(&state.db, &form.username, &form.password, &state.jwt_config).await?;
    Ok(Json(tokens))
}

/// Exchange a refresh token, sent as the bearer token, for a new pair.
#[utoipa::path(
    post,
    path = "/api/v1/login/refresh-token",
    responses(
        (status = 200, description = "Token pair", body = TokenResponse),
        (status = 400, description = "Not a refresh token or inactive user"),
        (status = 403, description = "Could not validate credentials")
    ),
    tag = "Login",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn login_refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let tokens = LoginService::refresh(&state.db, token, &state.jwt_config).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/api/v1/login/test-token",
    responses(
        (status = 200, description = "The token's user", body = User),
        (status = 403, description = "Could not validate credentials")
    ),
    tag = "Login",
    security(("bearer_auth" = []))
)]
pub async fn test_token(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    post,
    path = "/api/v1/password-recovery/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Recovery email sent", body = MessageResponse),
        (status = 404, description = "Unknown email")
    ),
    tag = "Login"
)]
#[instrument(skip(state))]
pub async fn recover_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let token = LoginService::create_recovery_token(&state.db, &email, &state.jwt_config).await?;

    EmailService::new(state.email_config.clone(), &state.app_config)
        .send_reset_password_email(&email, &token, state.jwt_config.reset_token_expiry / 3600)
        .await?;

    Ok(Json(MessageResponse::new("Password recovery email sent")))
}

#[utoipa::path(
    post,
    path = "/api/v1/reset-password/",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid token or inactive user"),
        (status = 404, description = "Unknown user"),
        (status = 422, description = "Password too weak")
    ),
    tag = "Login"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    LoginService::reset_password(&state.db, &body.token, body.new_password, &state.jwt_config)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
