pub use campus_models::years::*;
