mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus::modules::users::model::UserType;
use campus_auth::create_password_reset_token;
use campus_config::JwtConfig;
use common::{
    body_json, create_test_user, empty_request, generate_unique_email, get_auth_token, login,
    send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/login/access-token")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", email, password)))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_token_pair(pool: PgPool) {
    let user = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(&pool, login_request(&user.email, &user.password)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["token_type"], "bearer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(&pool, login_request(&user.email, "Wrongpass123")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&pool, login_request(&generate_unique_email(), "Wrongpass123")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_user_cannot_log_in(pool: PgPool) {
    let user = create_test_user(&pool, UserType::Student, false, None).await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(&pool, login_request(&user.email, &user.password)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_test_token_returns_user(pool: PgPool) {
    let user = create_test_user(&pool, UserType::Student, false, None).await;
    let token = login(&pool, &user).await;

    let response = send(&pool, empty_request("POST", "/api/v1/login/test-token", &token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], user.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_or_bad_token(pool: PgPool) {
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/users/me")
        .body(Body::empty())
        .unwrap();
    let response = send(&pool, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&pool, empty_request("GET", "/api/v1/users/me", "not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_token_flow(pool: PgPool) {
    let user = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(&pool, login_request(&user.email, &user.password)).await;
    let body = body_json(response).await;
    let access = body["access_token"].as_str().unwrap().to_string();
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    let response = send(
        &pool,
        empty_request("POST", "/api/v1/login/refresh-token", &refresh),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["access_token"].is_string());

    // An access token is not a refresh token and vice versa.
    let response = send(
        &pool,
        empty_request("POST", "/api/v1/login/refresh-token", &access),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&pool, empty_request("GET", "/api/v1/users/me", &refresh)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_recovery_unknown_email(pool: PgPool) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/password-recovery/{}", generate_unique_email()))
        .body(Body::empty())
        .unwrap();

    let response = send(&pool, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reset_password(pool: PgPool) {
    dotenvy::dotenv().ok();
    let user = create_test_user(&pool, UserType::Professor, false, None).await;
    let token = create_password_reset_token(&user.email, &JwtConfig::from_env()).unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/reset-password/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "token": token, "new_password": "Changed123" }))
                .unwrap(),
        ))
        .unwrap();

    let response = send(&pool, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = get_auth_token(setup_test_app(pool.clone()), &user.email, "Changed123").await;
    assert!(!token.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reset_password_rejects_bad_token(pool: PgPool) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/reset-password/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "token": "garbage", "new_password": "Changed123" }))
                .unwrap(),
        ))
        .unwrap();

    let response = send(&pool, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
