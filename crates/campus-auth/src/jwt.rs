//! Token creation and verification.
//!
//! Every token is signed with HS512 using [`JwtConfig::secret`]. Access and refresh
//! tokens carry the user id as subject; password reset tokens carry the email.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::AppError;

use crate::claims::{Claims, PasswordResetClaims, TokenResponse, TokenType};

const ALGORITHM: Algorithm = Algorithm::HS512;

fn now() -> usize {
    Utc::now().timestamp() as usize
}

fn create_token(
    user_id: Uuid,
    token_type: TokenType,
    lifetime_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: iat + lifetime_secs.max(0) as usize,
        iat,
        token_type,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token(
        user_id,
        TokenType::Access,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token(
        user_id,
        TokenType::Refresh,
        jwt_config.refresh_token_expiry,
        jwt_config,
    )
}

/// Access and refresh token pair for a freshly authenticated user.
pub fn create_tokens(user_id: Uuid, jwt_config: &JwtConfig) -> Result<TokenResponse, AppError> {
    Ok(TokenResponse::bearer(
        create_access_token(user_id, jwt_config)?,
        create_refresh_token(user_id, jwt_config)?,
    ))
}

/// Decodes a token and checks its `type` claim.
///
/// A bad signature, an expired token or a malformed payload is a 403
/// "Could not validate credentials". A valid token of the wrong type is a 400
/// "Invalid token".
fn verify_token(
    token: &str,
    expected: TokenType,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::new(ALGORITHM),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden("Could not validate credentials".to_string()))?;

    if claims.token_type != expected {
        return Err(AppError::bad_request(anyhow::anyhow!("Invalid token")));
    }

    Ok(claims)
}

pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_token(token, TokenType::Access, jwt_config)
}

pub fn verify_refresh_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_token(token, TokenType::Refresh, jwt_config)
}

pub fn create_password_reset_token(email: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let iat = now();
    let claims = PasswordResetClaims {
        sub: email.to_string(),
        exp: iat + jwt_config.reset_token_expiry.max(0) as usize,
        iat,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create reset token: {}", e)))
}

/// Returns the email a reset token was issued for, or `None` if the token is
/// invalid or expired.
pub fn verify_password_reset_token(token: &str, jwt_config: &JwtConfig) -> Option<String> {
    decode::<PasswordResetClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::new(ALGORITHM),
    )
    .ok()
    .map(|data| data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::with_secret("test-secret-key-at-least-32-characters-long")
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = get_test_jwt_config();
        let tokens = create_tokens(Uuid::new_v4(), &config).unwrap();

        let err = verify_access_token(&tokens.refresh_token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        let err = verify_refresh_token(&tokens.access_token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[test]
    fn test_wrong_secret_is_forbidden() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), &config).unwrap();

        let wrong_config = JwtConfig::with_secret("different-secret-key-at-least-32-characters");
        let err = verify_access_token(&token, &wrong_config).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_garbage_token_is_forbidden() {
        let config = get_test_jwt_config();
        let err = verify_access_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let tokens = create_tokens(user_id, &config).unwrap();

        let access = verify_access_token(&tokens.access_token, &config).unwrap();
        let refresh = verify_refresh_token(&tokens.refresh_token, &config).unwrap();
        assert!(refresh.exp > access.exp);
        assert_eq!(tokens.token_type, "bearer");
    }

    #[test]
    fn test_password_reset_token() {
        let config = get_test_jwt_config();
        let token = create_password_reset_token("someone@example.com", &config).unwrap();

        assert_eq!(
            verify_password_reset_token(&token, &config).as_deref(),
            Some("someone@example.com")
        );
        assert!(verify_password_reset_token("nope", &config).is_none());
    }
}
