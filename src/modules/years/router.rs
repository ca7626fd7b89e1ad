use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_year, delete_year, get_year, list_years, update_year};

pub fn init_years_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_years).post(create_year))
        .route("/{id}", get(get_year).put(update_year).delete(delete_year))
}
