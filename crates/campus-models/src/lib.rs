//! # Campus Models
//!
//! Database entities and request DTOs for the Campus API.
//!
//! Entities derive `sqlx::FromRow` and are returned directly from handlers.
//! DTOs derive `validator::Validate` and are checked before they reach a service.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID wrappers
//! - [`users`], [`admins`], [`professors`], [`students`]: accounts and their role rows
//! - [`schools`], [`years`], [`terms`], [`courses`], [`divisions`]: the academic hierarchy
//! - [`timeslots`], [`lectures`]: scheduling
//! - [`files`]: course documents and submissions
//! - [`auth`]: login and password recovery payloads

pub mod admins;
pub mod auth;
pub mod courses;
pub mod divisions;
pub mod files;
pub mod ids;
pub mod lectures;
pub mod professors;
pub mod schools;
pub mod students;
pub mod terms;
pub mod timeslots;
pub mod users;
pub mod years;

pub use ids::*;
pub use users::{User, UserType};
