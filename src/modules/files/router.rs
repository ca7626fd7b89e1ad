use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_file, list_course_files, list_my_files, list_submissions, update_file, upload_file,
};

pub fn init_files_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_files))
        .route("/course/{id}", get(list_course_files).post(upload_file))
        .route("/submission/{id}", get(list_submissions))
        .route("/{id}", get(get_file).put(update_file))
}
