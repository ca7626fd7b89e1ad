use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};

use campus_core::AppError;
use campus_models::auth::MessageResponse;

use crate::middleware::auth::CurrentAdmin;
use crate::state::AppState;
use crate::utils::email::EmailService;

/// Send a test email to check the SMTP settings.
#[utoipa::path(
    post,
    path = "/api/v1/utils/test-email/{email}",
    params(("email" = String, Path, description = "Recipient address")),
    responses(
        (status = 201, description = "Test email sent", body = MessageResponse),
        (status = 403, description = "User is not an administrator"),
        (status = 503, description = "Email sending is not configured")
    ),
    tag = "Utils",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current), fields(admin.id = %current.user.id))]
pub async fn send_test_email(
    State(state): State<AppState>,
    current: CurrentAdmin,
    Path(email): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let service = EmailService::new(state.email_config.clone(), &state.app_config);
    if !service.is_enabled() {
        return Err(AppError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            anyhow::anyhow!("Email sending is not configured"),
        ));
    }

    service.send_test_email(&email).await?;

    info!(email.to = %email, "Test email sent");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Test email sent"))))
}
