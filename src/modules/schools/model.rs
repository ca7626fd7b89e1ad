pub use campus_models::schools::*;
