//! Weekly timetables built from the lectures of one or more divisions.

pub mod controller;
pub mod router;
pub mod service;

pub use router::init_timetable_router;
