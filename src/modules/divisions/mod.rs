//! Divisions of a course and the students enrolled in them.
//!
//! A division is taught by one professor. Its students are spread over
//! `number_of_batches` batches, assigned round-robin on bulk enrolment.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_divisions_router;
