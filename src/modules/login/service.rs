use sqlx::PgPool;
use tracing::{info, instrument, warn};

use campus_auth::{
    create_password_reset_token, create_tokens, verify_password_reset_token,
    verify_refresh_token,
};
use campus_config::JwtConfig;
use campus_core::AppError;
use campus_models::ids::UserId;

use crate::modules::login::model::TokenResponse;
use crate::modules::users::model::UpdateUserDto;
use crate::modules::users::service::UserService;

pub struct LoginService;

impl LoginService {
    /// Exchanges an email and password for a token pair.
    #[instrument(skip(db, password, jwt_config))]
    pub async fn login(
        db: &PgPool,
        email: &str,
        password: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = UserService::authenticate(db, email, password)
            .await?
            .ok_or_else(|| AppError::unauthorized("Incorrect email or password".to_string()))?;

        if !user.is_active {
            warn!(user.id = %user.id, "Inactive user attempted to log in");
            return Err(AppError::bad_request(anyhow::anyhow!("Inactive user")));
        }

        info!(user.id = %user.id, "User logged in");
        create_tokens(user.id.into_inner(), jwt_config)
    }

    /// Issues a fresh token pair for a valid refresh token.
    #[instrument(skip_all)]
    pub async fn refresh(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AppError::forbidden("Could not validate credentials".to_string()))?;

        let user = UserService::find_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !user.is_active {
            return Err(AppError::bad_request(anyhow::anyhow!("Inactive user")));
        }

        create_tokens(user.id.into_inner(), jwt_config)
    }

    /// Creates a reset token for `email`. Unknown addresses are a 404.
    #[instrument(skip(db, jwt_config))]
    pub async fn create_recovery_token(
        db: &PgPool,
        email: &str,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        if UserService::find_by_email(db, email).await?.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "The user with this username does not exist in the system."
            )));
        }

        create_password_reset_token(email, jwt_config)
    }

    #[instrument(skip_all)]
    pub async fn reset_password(
        db: &PgPool,
        token: &str,
        new_password: String,
        jwt_config: &JwtConfig,
    ) -> Result<(), AppError> {
        let email = verify_password_reset_token(token, jwt_config)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid token")))?;

        let user = UserService::find_by_email(db, &email).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "The user with this username does not exist in the system."
            ))
        })?;

        if !user.is_active {
            return Err(AppError::bad_request(anyhow::anyhow!("Inactive user")));
        }

        UserService::update_user(
            db,
            user.id,
            UpdateUserDto {
                password: Some(new_password),
                ..Default::default()
            },
        )
        .await?;

        info!(user.id = %user.id, "Password reset");
        Ok(())
    }
}
