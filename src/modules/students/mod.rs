//! Student records. A student row shadows a `student` user account and holds
//! the term the student is enrolled in.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_students_router;
