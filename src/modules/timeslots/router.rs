use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_timeslot, delete_timeslot, get_timeslot, list_timeslots, update_timeslot,
};

pub fn init_timeslots_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_timeslots).post(create_timeslot))
        .route(
            "/{id}",
            get(get_timeslot).put(update_timeslot).delete(delete_timeslot),
        )
}
