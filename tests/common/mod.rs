#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use campus::modules::users::model::{CreateUserDto, User, UserType};
use campus::modules::users::service::UserService;
use campus::router::init_router;
use campus::state::AppState;
use campus_core::file_storage::LocalFileStorage;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    init_router(AppState::from_pool(pool))
}

/// Fresh directory for uploads made by one test.
pub fn temp_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("campus-uploads-{}", Uuid::new_v4()))
}

/// Router whose uploads land in `dir`.
pub fn setup_app_with_storage(pool: PgPool, dir: &Path) -> Router {
    dotenvy::dotenv().ok();
    let mut state = AppState::from_pool(pool);
    state.storage = Arc::new(LocalFileStorage::new(dir.to_path_buf(), "/static".to_string()));
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}

/// Creates an account through the service so role rows are set up the same
/// way the API does it.
pub async fn create_test_user(
    pool: &PgPool,
    user_type: UserType,
    is_admin: bool,
    school_id: Option<Uuid>,
) -> TestUser {
    let email = generate_unique_email();
    let user: User = UserService::create_user(
        pool,
        CreateUserDto {
            email: email.clone(),
            password: TEST_PASSWORD.to_string(),
            full_name: Some("Test User".to_string()),
            user_type,
            is_admin,
            is_active: true,
            school_id: school_id.map(Into::into),
        },
    )
    .await
    .unwrap();

    TestUser {
        id: user.id.into_inner(),
        email,
        password: TEST_PASSWORD.to_string(),
    }
}

/// An `admin` account with the given permission bitmask.
pub async fn create_test_admin(pool: &PgPool, permissions: i32) -> TestUser {
    let admin = create_test_user(pool, UserType::Admin, true, None).await;
    set_permissions(pool, admin.id, permissions).await;
    admin
}

pub async fn set_permissions(pool: &PgPool, user_id: Uuid, permissions: i32) {
    sqlx::query("UPDATE admins SET permissions = $1 WHERE user_id = $2")
        .bind(permissions)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn admin_permissions(pool: &PgPool, user_id: Uuid) -> Option<i32> {
    sqlx::query_scalar::<_, i32>("SELECT permissions FROM admins WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn create_test_school(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO schools (name) VALUES ($1) RETURNING id")
        .bind(generate_unique_name("School"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_year(pool: &PgPool, school_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO years (name, school_id, start_year, end_year)
         VALUES ($1, $2, 2024, 2025) RETURNING id",
    )
    .bind(generate_unique_name("Year"))
    .bind(school_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_term(pool: &PgPool, year_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO terms (name, year_id, current_year_term, start_date)
         VALUES ($1, $2, 1, '2024-08-01') RETURNING id",
    )
    .bind(generate_unique_name("Term"))
    .bind(year_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_course(pool: &PgPool, term_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (name, course_code, term_id) VALUES ($1, 'CS101', $2) RETURNING id",
    )
    .bind(generate_unique_name("Course"))
    .bind(term_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_division(
    pool: &PgPool,
    course_id: Uuid,
    professor_id: Uuid,
    number_of_batches: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO divisions (course_id, division_code, professor_id, number_of_batches)
         VALUES ($1, 1, $2, $3) RETURNING id",
    )
    .bind(course_id)
    .bind(professor_id)
    .bind(number_of_batches)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn set_student_term(pool: &PgPool, student_id: Uuid, term_id: Uuid) {
    sqlx::query("UPDATE students SET term_id = $1 WHERE user_id = $2")
        .bind(term_id)
        .bind(student_id)
        .execute(pool)
        .await
        .unwrap();
}

/// A school with one year, term and course. Returns `(school, term, course)`.
pub async fn create_test_hierarchy(pool: &PgPool) -> (Uuid, Uuid, Uuid) {
    let school_id = create_test_school(pool).await;
    let year_id = create_test_year(pool, school_id).await;
    let term_id = create_test_term(pool, year_id).await;
    let course_id = create_test_course(pool, term_id).await;
    (school_id, term_id, course_id)
}

pub async fn get_auth_token(app: Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/login/access-token")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email, password
        )))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn login(pool: &PgPool, user: &TestUser) -> String {
    get_auth_token(setup_test_app(pool.clone()), &user.email, &user.password).await
}

pub fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Sends one request through a fresh router.
pub async fn send(pool: &PgPool, request: Request<Body>) -> Response<Body> {
    setup_test_app(pool.clone()).oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Raw body text, for assertions on key order that `Value` does not keep.
pub async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

const MULTIPART_BOUNDARY: &str = "campus-test-boundary";

/// A `multipart/form-data` request carrying one file part named `field`.
pub fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    field: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
