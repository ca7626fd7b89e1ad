//! Daily time slots of a school that lectures are scheduled into.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_timeslots_router;
