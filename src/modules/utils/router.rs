use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::send_test_email;

pub fn init_utils_router() -> Router<AppState> {
    Router::new().route("/test-email/{email}", post(send_test_email))
}
