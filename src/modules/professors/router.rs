use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_my_divisions, get_my_professor, get_professor, get_professor_divisions,
    list_professors, update_professor,
};

pub fn init_professors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_professors))
        .route("/me", get(get_my_professor))
        .route("/me/divisions", get(get_my_divisions))
        .route("/{id}", get(get_professor).put(update_professor))
        .route("/{id}/divisions", get(get_professor_divisions))
}
