//! Weekly lectures of a division, placed into a school timeslot.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_lectures_router;
