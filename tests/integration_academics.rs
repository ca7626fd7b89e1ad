mod common;

use axum::http::StatusCode;
use campus::modules::users::model::UserType;
use campus_core::permissions::{
    AdminPermissions, COURSE, PROFESSOR, SCHOOL, STUDENT, TERM, YEAR,
};
use common::{
    body_json, create_test_admin, create_test_course, create_test_hierarchy, create_test_school,
    create_test_term, create_test_user, create_test_year, empty_request, generate_unique_name,
    json_request, login, send,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn bits(names: &[&str]) -> i32 {
    AdminPermissions::from_names(names).unwrap().permissions()
}

// ---------------------------------------------------------------------------
// Schools
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_fetch_school(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL])).await;
    let token = login(&pool, &admin).await;
    let name = generate_unique_name("School");

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/schools",
            &token,
            json!({ "name": name, "head": "Dr. Head" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/schools/{}", id), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], name);

    let response = send(
        &pool,
        json_request("POST", "/api/v1/schools", &token, json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_school_members_can_read_their_school(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let other_school = create_test_school(&pool).await;
    let professor = create_test_user(&pool, UserType::Professor, false, Some(school_id)).await;
    let token = login(&pool, &professor).await;

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/schools/{}", school_id), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/schools/{}", other_school), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_school_requires_permission_to_create(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[YEAR, TERM])).await;
    let token = login(&pool, &admin).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/schools",
            &token,
            json!({ "name": generate_unique_name("School") }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_school(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;
    let uri = format!("/api/v1/schools/{}", school_id);

    let response = send(&pool, empty_request("DELETE", &uri, &token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&pool, empty_request("DELETE", &uri, &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_school_rosters(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;
    let student = create_test_user(&pool, UserType::Student, false, Some(school_id)).await;
    let professor = create_test_user(&pool, UserType::Professor, false, Some(school_id)).await;
    create_test_user(&pool, UserType::Student, false, None).await;

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/schools/{}/students", school_id), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["user_id"], student.id.to_string());

    let response = send(
        &pool,
        empty_request(
            "GET",
            &format!("/api/v1/schools/{}/professors", school_id),
            &token,
        ),
    )
    .await;
    let body = body_json(response).await;
    let professors = body.as_array().unwrap();
    assert_eq!(professors.len(), 1);
    assert_eq!(professors[0]["email"], professor.email);
}

// ---------------------------------------------------------------------------
// Years and terms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_year(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[YEAR])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;
    let year = json!({
        "name": "2024-25",
        "school_id": school_id,
        "start_year": 2024,
        "end_year": 2025
    });

    let response = send(&pool, json_request("POST", "/api/v1/years", &token, year.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["is_active"], true);

    let response = send(&pool, json_request("POST", "/api/v1/years", &token, year)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_year_cannot_end_before_it_starts(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[YEAR])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/years",
            &token,
            json!({ "name": "Backwards", "school_id": school_id, "start_year": 2025, "end_year": 2024 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let year_id = create_test_year(&pool, school_id).await;
    let response = send(
        &pool,
        json_request(
            "PUT",
            &format!("/api/v1/years/{}", year_id),
            &token,
            json!({ "end_year": 2000 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_year_for_unknown_school(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[YEAR])).await;
    let token = login(&pool, &admin).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/years",
            &token,
            json!({ "name": "Orphan", "school_id": Uuid::new_v4(), "start_year": 2024, "end_year": 2025 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_update_term(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[TERM])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;
    let year_id = create_test_year(&pool, school_id).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/terms",
            &token,
            json!({
                "name": "Autumn",
                "year_id": year_id,
                "current_year_term": 1,
                "start_date": "2024-08-01",
                "end_date": "2024-12-15"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["has_electives"], false);
    let id = body["id"].as_str().unwrap().to_string();

    let response = send(
        &pool,
        json_request(
            "PUT",
            &format!("/api/v1/terms/{}", id),
            &token,
            json!({ "end_date": "2024-01-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &pool,
        json_request(
            "PUT",
            &format!("/api/v1/terms/{}", id),
            &token,
            json!({ "has_electives": true }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["has_electives"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_term(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[TERM])).await;
    let token = login(&pool, &admin).await;

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/terms/{}", Uuid::new_v4()), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_course_crud(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[COURSE])).await;
    let token = login(&pool, &admin).await;
    let school_id = create_test_school(&pool).await;
    let year_id = create_test_year(&pool, school_id).await;
    let term_id = create_test_term(&pool, year_id).await;
    let course = json!({ "name": "Databases", "course_code": "CS301", "term_id": term_id });

    let response = send(&pool, json_request("POST", "/api/v1/courses", &token, course.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = send(&pool, json_request("POST", "/api/v1/courses", &token, course)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let uri = format!("/api/v1/courses/{}", id);
    let response = send(
        &pool,
        json_request("PUT", &uri, &token, json!({ "elective_code": "E1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["elective_code"], "E1");
    assert_eq!(body["name"], "Databases");

    let response = send(&pool, empty_request("DELETE", &uri, &token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&pool, empty_request("GET", &uri, &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_for_unknown_term(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[COURSE])).await;
    let token = login(&pool, &admin).await;

    let response = send(
        &pool,
        json_request(
            "POST",
            "/api/v1/courses",
            &token,
            json!({ "name": "Nowhere", "course_code": "X1", "term_id": Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Students and professors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_student_term(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[STUDENT])).await;
    let token = login(&pool, &admin).await;
    let (school_id, term_id, _) = create_test_hierarchy(&pool).await;
    let student = create_test_user(&pool, UserType::Student, false, Some(school_id)).await;
    let uri = format!("/api/v1/students/{}", student.id);

    let response = send(&pool, json_request("PUT", &uri, &token, json!({ "term_id": term_id }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["term_id"], term_id.to_string());

    let response = send(
        &pool,
        json_request("PUT", &uri, &token, json!({ "term_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_self(pool: PgPool) {
    let student = create_test_user(&pool, UserType::Student, false, None).await;
    let other = create_test_user(&pool, UserType::Student, false, None).await;
    let token = login(&pool, &student).await;

    let response = send(&pool, empty_request("GET", "/api/v1/students/me", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], student.id.to_string());

    let response = send(
        &pool,
        empty_request("GET", &format!("/api/v1/students/{}", other.id), &token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_endpoint_rejects_students(pool: PgPool) {
    let student = create_test_user(&pool, UserType::Student, false, None).await;
    let token = login(&pool, &student).await;

    let response = send(&pool, empty_request("GET", "/api/v1/professors/me", &token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_professor(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[PROFESSOR])).await;
    let token = login(&pool, &admin).await;
    let professor = create_test_user(&pool, UserType::Professor, false, None).await;

    let response = send(
        &pool,
        json_request(
            "PUT",
            &format!("/api/v1/professors/{}", professor.id),
            &token,
            json!({ "full_name": "Prof. Turing" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["full_name"], "Prof. Turing");

    let response = send(
        &pool,
        json_request(
            "PUT",
            &format!("/api/v1/professors/{}", Uuid::new_v4()),
            &token,
            json!({ "full_name": "Ghost" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_listing_needs_course_permission(pool: PgPool) {
    let admin = create_test_admin(&pool, bits(&[SCHOOL])).await;
    let token = login(&pool, &admin).await;
    let (_, term_id, _) = create_test_hierarchy(&pool).await;
    create_test_course(&pool, term_id).await;

    let response = send(&pool, empty_request("GET", "/api/v1/courses", &token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
