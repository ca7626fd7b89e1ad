//! User data models and DTOs.
//!
//! Re-exports the account types from `campus-models`.

pub use campus_models::users::*;
