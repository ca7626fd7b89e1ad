//! # Campus Auth
//!
//! JWT utilities for the Campus API.
//!
//! - [`claims`]: token claim structures
//! - [`jwt`]: token creation and verification (HS512)
//!
//! Access and refresh tokens share one claim shape and are told apart by the
//! `type` claim, so a refresh token is never accepted where an access token is
//! expected and vice versa.
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{create_tokens, verify_access_token};
//! use campus_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let tokens = create_tokens(user_id, &config)?;
//! let claims = verify_access_token(&tokens.access_token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, PasswordResetClaims, TokenResponse, TokenType};
pub use jwt::{
    create_access_token, create_password_reset_token, create_refresh_token, create_tokens,
    verify_access_token, verify_password_reset_token, verify_refresh_token,
};
