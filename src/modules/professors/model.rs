pub use campus_models::professors::*;
