use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    create_user, get_me, get_user_by_id, list_users, update_me, update_profile_picture,
    update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_me).put(update_me))
        .route("/{id}", get(get_user_by_id).put(update_user))
        .route("/{id}/profile_picture", put(update_profile_picture))
}
