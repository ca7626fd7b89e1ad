pub use campus_models::courses::*;
