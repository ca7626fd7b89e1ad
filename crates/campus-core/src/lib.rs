//! # Campus Core
//!
//! Core types, errors, and utilities for the Campus API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`file_storage`]: Storage backend for uploaded pictures and course files
//! - [`pagination`]: `skip`/`limit` list parameters
//! - [`password`]: Password hashing, verification and strength rules
//! - [`permissions`]: The admin capability bitmask
//!
//! # Example
//!
//! ```ignore
//! use campus_core::errors::AppError;
//! use campus_core::permissions::AdminPermissions;
//!
//! let perms = AdminPermissions::new(admin.permissions);
//! if !perms.is_allowed("school") {
//!     return Err(AppError::forbidden("This admin doesn't have enough privileges".to_string()));
//! }
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::ListParams;
pub use password::{hash_password, verify_password};
pub use permissions::AdminPermissions;
