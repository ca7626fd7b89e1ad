//! Course documents: material and assignments uploaded by staff, and the
//! submissions students upload against an assignment.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_files_router;
