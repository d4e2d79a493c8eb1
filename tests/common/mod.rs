#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fitness_tracker::db::{create_memory_pool, DbPool};
use fitness_tracker::migrations::run_migrations_for_tests;
use fitness_tracker::models::{NewUser, User};
use fitness_tracker::repositories::{SessionRepository, UserRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    fitness_tracker::routes::create_app(pool)
}

pub async fn create_test_user(pool: &DbPool, email: &str, password: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo
        .create(NewUser {
            name: Some("Test User".to_string()),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    let token = session_repo.create(&user.id).await.unwrap();
    format!("session={}", token)
}

/// A fresh user with a live session, returned as a Cookie header value.
pub async fn signed_in(pool: &DbPool, email: &str) -> String {
    let user = create_test_user(pool, email, "password123").await;
    create_session_cookie(pool, &user).await
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Inserts equipment and muscles with fixed ids for exercise tests.
pub fn insert_reference_data(pool: &DbPool) {
    let conn = pool.get().unwrap();
    conn.execute_batch(
        "INSERT INTO fitness_tracker_equipment (id, name) VALUES ('mat', 'Gym Mat');
         INSERT INTO fitness_tracker_equipment (id, name) VALUES ('bar', 'Pull-up Bar');
         INSERT INTO fitness_tracker_muscles (id, name, is_front) VALUES ('chest', 'Chest', 1);
         INSERT INTO fitness_tracker_muscles (id, name, is_front) VALUES ('triceps', 'Triceps', 0);
         INSERT INTO fitness_tracker_muscles (id, name, is_front) VALUES ('core', 'Core', 1);",
    )
    .unwrap();
}
