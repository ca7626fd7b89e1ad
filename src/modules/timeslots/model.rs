pub use campus_models::timeslots::*;
