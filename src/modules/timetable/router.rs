use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_division_timetable, get_my_timetable};

pub fn init_timetable_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_my_timetable))
        .route("/{division_id}", get(get_division_timetable))
}
