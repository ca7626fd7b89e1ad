use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_term, delete_term, get_term, list_terms, update_term};

pub fn init_terms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_terms).post(create_term))
        .route("/{id}", get(get_term).put(update_term).delete(delete_term))
}
