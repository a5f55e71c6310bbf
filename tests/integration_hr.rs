mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    access_token_for, body_json, create_test_user, generate_unique_email, get_request,
    json_request, registration_payload, setup_test_app,
};
use schoolhub_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn patch_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_use_hr_endpoints(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let token = access_token_for(&teacher);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request("/hr/teachers", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "You don't have permission to perform this action");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hr_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get_request("/hr/staff", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_headmaster_creates_teacher(pool: PgPool) {
    let headmaster = create_test_user(&pool, UserRole::Headmaster, true).await;
    let token = access_token_for(&headmaster);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/hr/create-teacher",
            Some(&token),
            &registration_payload(&generate_unique_email(), "teacher"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["created_by"], headmaster.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_teacher_rejects_other_roles(pool: PgPool) {
    let manager = create_test_user(&pool, UserRole::Manager, true).await;
    let token = access_token_for(&manager);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/hr/create-teacher",
            Some(&token),
            &registration_payload(&generate_unique_email(), "librarian"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Role must be teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_staff_accepts_bursar_alias(pool: PgPool) {
    let manager = create_test_user(&pool, UserRole::Manager, true).await;
    let token = access_token_for(&manager);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/hr/create-staff",
            Some(&token),
            &registration_payload(&generate_unique_email(), "burser"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["role"], "bursar");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_staff_rejects_student(pool: PgPool) {
    let manager = create_test_user(&pool, UserRole::Manager, true).await;
    let token = access_token_for(&manager);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/hr/create-staff",
            Some(&token),
            &registration_payload(&generate_unique_email(), "student"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Role must be one of: librarian, bursar, teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_staff_filters_roles(pool: PgPool) {
    let headmaster = create_test_user(&pool, UserRole::Headmaster, true).await;
    create_test_user(&pool, UserRole::Teacher, true).await;
    create_test_user(&pool, UserRole::Librarian, true).await;
    create_test_user(&pool, UserRole::Bursar, false).await;
    create_test_user(&pool, UserRole::Student, true).await;
    let token = access_token_for(&headmaster);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/hr/staff", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let response = setup_test_app(pool)
        .oneshot(get_request("/hr/teachers", Some(&token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["role"], "teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivated_user_token_stops_working(pool: PgPool) {
    let headmaster = create_test_user(&pool, UserRole::Headmaster, true).await;
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let hr_token = access_token_for(&headmaster);
    let teacher_token = access_token_for(&teacher);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users/getUsers", Some(&teacher_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = setup_test_app(pool.clone())
        .oneshot(patch_request(
            &format!("/hr/deactivate/{}", teacher.id),
            &hr_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        format!("User {} has been deactivated", teacher.email)
    );

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users/getUsers", Some(&teacher_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = setup_test_app(pool)
        .oneshot(patch_request(
            &format!("/hr/activate/{}", teacher.id),
            &hr_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_details_and_missing_user(pool: PgPool) {
    let manager = create_test_user(&pool, UserRole::Manager, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let token = access_token_for(&manager);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request(&format!("/hr/user/{}", student.id), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request(&format!("/hr/user/{}", Uuid::new_v4()), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = setup_test_app(pool)
        .oneshot(patch_request(
            &format!("/hr/activate/{}", Uuid::new_v4()),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_user_id_returns_json_error(pool: PgPool) {
    let headmaster = create_test_user(&pool, UserRole::Headmaster, true).await;
    let token = access_token_for(&headmaster);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/hr/user/not-a-uuid", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter")
    );

    let response = setup_test_app(pool)
        .oneshot(patch_request("/hr/deactivate/42", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
