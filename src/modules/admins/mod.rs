//! Promotion of professors to administrators and admin permission management.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_admins_router;
