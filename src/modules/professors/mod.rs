//! Professor records. A professor row shadows a `professor` user account.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_professors_router;
