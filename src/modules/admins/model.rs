pub use campus_models::admins::*;
