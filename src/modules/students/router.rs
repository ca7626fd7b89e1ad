use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_my_divisions, get_my_student, get_student, get_student_divisions, list_students,
    update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students))
        .route("/me", get(get_my_student))
        .route("/me/divisions", get(get_my_divisions))
        .route("/{id}", get(get_student).put(update_student))
        .route("/{id}/divisions", get(get_student_divisions))
}
