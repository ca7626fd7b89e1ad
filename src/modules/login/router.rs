use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{
    login_access_token, login_refresh_token, recover_password, reset_password, test_token,
};

/// Mounted at the API root: `/login/*`, `/password-recovery/{email}` and
/// `/reset-password/`.
pub fn init_login_router() -> Router<AppState> {
    Router::new()
        .route("/login/access-token", post(login_access_token))
        .route("/login/refresh-token", post(login_refresh_token))
        .route("/login/test-token", post(test_token))
        .route("/password-recovery/{email}", post(recover_password))
        .route("/reset-password/", post(reset_password))
}
