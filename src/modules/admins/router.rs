use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{demote_admin, get_current_admin, promote_admin, update_admin};

pub fn init_admins_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_current_admin)
            .post(promote_admin)
            .put(update_admin)
            .delete(demote_admin),
    )
}
