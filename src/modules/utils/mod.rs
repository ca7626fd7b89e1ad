//! Operational endpoints for administrators.

pub mod controller;
pub mod router;

pub use router::init_utils_router;
