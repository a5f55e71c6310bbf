mod common;

use axum::http::StatusCode;
use common::{access_token_for, body_json, create_test_user, get_request, setup_test_app};
use schoolhub_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_users_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get_request("/users/getUsers", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not authenticated");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_users_rejects_garbage_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request("/users/getUsers", Some("not.a.jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Could not validate credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_users_paginates(pool: PgPool) {
    let caller = create_test_user(&pool, UserRole::Student, true).await;
    for _ in 0..4 {
        create_test_user(&pool, UserRole::Parent, true).await;
    }
    let token = access_token_for(&caller);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users/getUsers?skip=1&limit=2", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = setup_test_app(pool)
        .oneshot(get_request("/users/getUsers", Some(&token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_id(pool: PgPool) {
    let caller = create_test_user(&pool, UserRole::Teacher, true).await;
    let other = create_test_user(&pool, UserRole::Student, true).await;
    let token = access_token_for(&caller);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(&format!("/users/getUser/{}", other.id), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], other.id.to_string());
    assert_eq!(body["email"], other.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_not_found(pool: PgPool) {
    let caller = create_test_user(&pool, UserRole::Teacher, true).await;
    let token = access_token_for(&caller);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(
            &format!("/users/getUser/{}", Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_email_skips_inactive(pool: PgPool) {
    let caller = create_test_user(&pool, UserRole::Bursar, true).await;
    let active = create_test_user(&pool, UserRole::Student, true).await;
    let inactive = create_test_user(&pool, UserRole::Student, false).await;
    let token = access_token_for(&caller);

    let response = setup_test_app(pool.clone())
        .oneshot(get_request(&format!("/users/email/{}", active.email), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = setup_test_app(pool)
        .oneshot(get_request(&format!("/users/email/{}", inactive.email), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_and_banner(pool: PgPool) {
    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"], "up");

    let response = setup_test_app(pool)
        .oneshot(get_request("/", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("SchoolHub API"));
}
