pub use campus_models::terms::*;
