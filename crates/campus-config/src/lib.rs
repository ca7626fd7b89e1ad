//! # Campus Config
//!
//! Configuration types for the Campus API.
//!
//! Each struct is built once at startup from environment variables and carried in
//! the application state:
//!
//! - [`app`]: project name, API prefix, listen address and first superuser
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`email`]: SMTP settings
//! - [`storage`]: upload directory and public URL prefix
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{AppConfig, CorsConfig, EmailConfig, JwtConfig, StorageConfig};
//!
//! let app_config = AppConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let email_config = EmailConfig::from_env(&app_config.project_name);
//! ```

pub mod app;
pub mod cors;
pub mod email;
pub mod jwt;
pub mod storage;

// Re-export commonly used types at crate root
pub use app::AppConfig;
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use storage::StorageConfig;

/// Reads a variable, treating blank values as unset.
pub(crate) fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
