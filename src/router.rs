use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use sentry::integrations::tower::{NewSentryLayer, SentryHttpLayer};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::admins::init_admins_router;
use crate::modules::courses::init_courses_router;
use crate::modules::divisions::init_divisions_router;
use crate::modules::files::init_files_router;
use crate::modules::lectures::init_lectures_router;
use crate::modules::login::router::init_login_router;
use crate::modules::professors::init_professors_router;
use crate::modules::schools::init_schools_router;
use crate::modules::students::init_students_router;
use crate::modules::terms::init_terms_router;
use crate::modules::timeslots::init_timeslots_router;
use crate::modules::timetable::init_timetable_router;
use crate::modules::users::init_users_router;
use crate::modules::utils::init_utils_router;
use crate::modules::years::init_years_router;
use crate::state::AppState;

fn api_router() -> Router<AppState> {
    Router::new()
        .merge(init_login_router())
        .nest("/users", init_users_router())
        .nest("/admins", init_admins_router())
        .nest("/utils", init_utils_router())
        .nest("/schools", init_schools_router())
        .nest("/years", init_years_router())
        .nest("/terms", init_terms_router())
        .nest("/courses", init_courses_router())
        .nest("/divisions", init_divisions_router())
        .nest("/professors", init_professors_router())
        .nest("/students", init_students_router())
        .nest("/timeslots", init_timeslots_router())
        .nest("/lectures", init_lectures_router())
        .nest("/timetable", init_timetable_router())
        .nest("/files", init_files_router())
}

pub fn init_router(state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(&state.app_config.api_prefix, api_router());

    // Uploads are only served here when the public URL is a local path.
    let uploads_path = state.storage_config.base_url.trim_end_matches('/');
    if uploads_path.starts_with('/') {
        app = app.nest_service(uploads_path, ServeDir::new(&state.storage_config.base_dir));
    }

    app.layer(DefaultBodyLimit::max(state.storage_config.max_upload_bytes))
        .with_state(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(SentryHttpLayer::new())
        .layer(NewSentryLayer::<Request>::new_from_top())
}
