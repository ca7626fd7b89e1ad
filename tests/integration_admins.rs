mod common;

use axum::http::StatusCode;
use campus::modules::users::model::UserType;
use campus_core::permissions::{ADMIN, AdminPermissions, SCHOOL, YEAR};
use common::{
    admin_permissions, body_json, create_test_admin, create_test_user, empty_request,
    json_request, login, send,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn bits(names: &[&str]) -> i32 {
    AdminPermissions::from_names(names).unwrap().permissions()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_admin(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL])).await;
    let token = login(&pool, &admin).await;

    let response = send(&pool, empty_request("GET", "/api/v1/admins", &token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user_id"], admin.id.to_string());
    assert_eq!(body["permissions"], bits(&[SCHOOL]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admin_cannot_read_admin_row(pool: PgPool) {
    let professor = create_test_user(&pool, UserType::Professor, false, None).await;
    let token = login(&pool, &professor).await;

    let response = send(&pool, empty_request("GET", "/api/v1/admins", &token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_professor(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id, "permissions": bits(&[YEAR]) }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        admin_permissions(&pool, professor.id).await,
        Some(bits(&[YEAR]))
    );

    let is_admin =
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(professor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_admin);

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_cannot_be_promoted(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let student = create_test_user(&pool, UserType::Student, false, None).await;

    let response = send(
        &pool,
        json_request("POST", "/api/v1/admins", &token, json!({ "user_id": student.id })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(admin_permissions(&pool, student.id).await, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_unknown_user(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;

    let response = send(
        &pool,
        json_request("POST", "/api/v1/admins", &token, json!({ "user_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_requires_admin_permission(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL, YEAR])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(
        &pool,
        json_request("POST", "/api/v1/admins", &token, json!({ "user_id": professor.id })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_permissions(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, true, None).await;

    let response = send(
        &pool,
        json_request(
            "PUT",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id, "permissions": bits(&[SCHOOL, YEAR]) }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["permissions"], bits(&[SCHOOL, YEAR]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_superuser_permissions_are_protected(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let root = create_test_user(&pool, UserType::Superuser, true, None).await;

    let response = send(
        &pool,
        json_request(
            "PUT",
            "/api/v1/admins",
            &token,
            json!({ "user_id": root.id, "permissions": 0 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(admin_permissions(&pool, root.id).await, Some(-1));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_negative_permissions_are_rejected(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, true, None).await;

    let response = send(
        &pool,
        json_request(
            "PUT",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id, "permissions": -1 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_demote_professor(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, true, None).await;

    let response = send(
        &pool,
        json_request(
            "DELETE",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(admin_permissions(&pool, professor.id).await, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_accounts_cannot_be_demoted(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let other = create_test_admin(&pool, 0).await;

    let response = send(
        &pool,
        json_request("DELETE", "/api/v1/admins", &token, json!({ "user_id": other.id })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(admin_permissions(&pool, other.id).await, Some(0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_demote_without_admin_row_changes_nothing(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[ADMIN])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, true, None).await;
    sqlx::query("DELETE FROM admins WHERE user_id = $1")
        .bind(professor.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(
        &pool,
        json_request(
            "DELETE",
            "/api/v1/admins",
            &token,
            json!({ "user_id": professor.id }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let is_admin = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
        .bind(professor.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(is_admin);
}
