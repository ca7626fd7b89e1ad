use std::env;

/// 8 days
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 8;
/// 30 days
pub const DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 30;
pub const DEFAULT_RESET_TOKEN_EXPIRE_HOURS: i64 = 48;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
    /// Password reset token lifetime in seconds.
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY is not set, using an insecure development key");
            "change-this-secret-key-in-production".to_string()
        });

        Self {
            secret,
            access_token_expiry: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES)
                * 60,
            refresh_token_expiry: env::var("REFRESH_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES)
                * 60,
            reset_token_expiry: env::var("EMAIL_RESET_TOKEN_EXPIRE_HOURS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(DEFAULT_RESET_TOKEN_EXPIRE_HOURS)
                * 3600,
        }
    }

    /// Config with default lifetimes and the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES * 60,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES * 60,
            reset_token_expiry: DEFAULT_RESET_TOKEN_EXPIRE_HOURS * 3600,
        }
    }
}
