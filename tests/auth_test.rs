mod common;

use axum::http::{header, StatusCode};
use serde_json::json;

use common::{body_json, empty_request, json_request, send};

#[tokio::test]
async fn test_register_signs_in() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"name": "Ada", "email": "Ada@Example.com", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password_hash").is_none());

    let cookie = common::extract_cookie_header(&set_cookie);
    let response = send(&app, empty_request("GET", "/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Ada");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let pool = common::setup_test_db();
    common::create_test_user(&pool, "taken@example.com", "password123").await;
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"email": "TAKEN@example.com", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "constraint");
}

#[tokio::test]
async fn test_register_short_password_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            json!({"email": "new@example.com", "password": "short"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation");
}

#[tokio::test]
async fn test_login_valid_credentials() {
    let pool = common::setup_test_db();
    common::create_test_user(&pool, "user@example.com", "password123").await;
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@example.com", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = common::setup_test_db();
    common::create_test_user(&pool, "user@example.com", "password123").await;
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@example.com", "password": "wrongpassword"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_me_requires_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("GET", "/auth/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        empty_request("GET", "/auth/me", Some("session=not-a-real-token")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("POST", "/auth/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request("GET", "/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    pool.get()
        .unwrap()
        .execute(
            "UPDATE fitness_tracker_sessions SET expires_at = ?",
            [chrono::Utc::now() - chrono::Duration::hours(1)],
        )
        .unwrap();
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("GET", "/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
