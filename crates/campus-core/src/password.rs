//! Password hashing and strength rules.

use bcrypt::{DEFAULT_COST, hash, verify};
use validator::ValidationError;

use crate::errors::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Custom `validator` rule: at least eight characters with one digit, one
/// lowercase and one uppercase letter.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_length")
            .with_message("Password must contain at least 8 characters".into()));
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());

    if !(has_digit && has_lower && has_upper) {
        return Err(ValidationError::new("password_strength").with_message(
            "Password must contain at least one upper case letter, one lower case letter and one digit"
                .into(),
        ));
    }

    Ok(())
}
