use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use serde_json::Value;

use fitness_tracker::error::AppError;

async fn body(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404() {
    let (status, body) = body(AppError::NotFound("Workout not found".to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Workout not found");
}

#[tokio::test]
async fn test_validation_returns_400() {
    let (status, body) = body(AppError::Validation("Invalid field".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn test_constraint_returns_409() {
    let (status, body) = body(AppError::Constraint("Equipment not found: x".to_string())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Equipment not found: x");
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let (status, body) = body(AppError::Unauthorized).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_internal_hides_details() {
    let (status, body) = body(AppError::Internal("join handle panicked".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal");
    assert_eq!(body["message"], "Internal error");
}

#[tokio::test]
async fn test_password_hash_returns_500() {
    let (status, _) = body(AppError::PasswordHash).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_database_error_returns_500() {
    let (status, body) = body(AppError::Database(rusqlite::Error::InvalidQuery)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database");
    assert_eq!(body["message"], "Database error");
}
