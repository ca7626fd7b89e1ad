use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_division, delete_division, enrol_students, get_division, list_batch_students,
    list_division_students, list_divisions, remove_student, update_division,
};

pub fn init_divisions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_divisions).post(create_division))
        .route(
            "/{id}",
            get(get_division).put(update_division).delete(delete_division),
        )
        .route(
            "/{id}/students",
            get(list_division_students).post(enrol_students),
        )
        // GET reads a batch number here, DELETE a student id.
        .route(
            "/{id}/students/{key}",
            get(list_batch_students).delete(remove_student),
        )
}
