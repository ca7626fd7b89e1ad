//! Account bootstrapping shared by the server startup and `campus-cli`.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use campus_config::AppConfig;
use campus_core::AppError;

use crate::modules::users::model::{CreateUserDto, User, UserType};
use crate::modules::users::service::UserService;

/// Creates an active superuser. Fails with 422 for a weak password and 409
/// when the email is taken.
pub async fn create_superuser(
    db: &PgPool,
    email: &str,
    password: &str,
    full_name: Option<String>,
) -> Result<User, AppError> {
    let dto = CreateUserDto {
        email: email.to_string(),
        password: password.to_string(),
        full_name,
        user_type: UserType::Superuser,
        is_admin: true,
        is_active: true,
        school_id: None,
    };
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("{}", e)))?;

    UserService::create_user(db, dto).await
}

/// Creates the `FIRST_SUPERUSER` account unless it already exists.
pub async fn ensure_first_superuser(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (
        config.first_superuser.as_deref(),
        config.first_superuser_password.as_deref(),
    ) else {
        info!("FIRST_SUPERUSER not configured, skipping bootstrap");
        return Ok(());
    };

    if UserService::find_by_email(db, email)
        .await
        .map_err(|e| e.error)?
        .is_some()
    {
        return Ok(());
    }

    let user = create_superuser(db, email, password, None)
        .await
        .map_err(|e| e.error)?;
    info!(user.id = %user.id, "First superuser created");
    Ok(())
}
