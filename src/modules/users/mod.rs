//! User accounts.
//!
//! Creating or updating a user also maintains the matching `admins`,
//! `professors` and `students` rows, see [`service::UserService`].

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_users_router;
