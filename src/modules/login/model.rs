pub use campus_auth::TokenResponse;
pub use campus_models::auth::*;
