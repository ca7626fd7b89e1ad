pub use campus_models::divisions::*;
pub use campus_models::students::DivisionStudent;
