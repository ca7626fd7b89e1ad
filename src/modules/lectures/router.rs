use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_lecture, delete_lecture, get_lecture, list_division_lectures, list_lectures,
    update_lecture,
};

pub fn init_lectures_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lectures).post(create_lecture))
        .route(
            "/{id}",
            get(get_lecture).put(update_lecture).delete(delete_lecture),
        )
        .route("/division/{id}", get(list_division_lectures))
}
