mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{body_json, empty_request, json_request, send};

#[tokio::test]
async fn test_muscles_empty_list() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("GET", "/muscles", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_muscle_crud() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/muscles",
            Some(&cookie),
            json!({"name": "Biceps", "description": "Front of the upper arm", "is_front": true}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let muscle = body_json(response).await;
    assert_eq!(muscle["is_front"], true);
    let uri = format!("/muscles/{}", muscle["id"].as_str().unwrap());

    let response = send(
        &app,
        json_request("PUT", &uri, Some(&cookie), json!({"description": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Biceps");
    assert_eq!(updated["description"], Value::Null);

    let response = send(&app, empty_request("DELETE", &uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request("GET", &uri, None)).await;
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_muscle_writes_require_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request("POST", "/muscles", None, json!({"name": "Glutes"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_equipment_crud() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    for name in ["Kettlebell", "Barbell"] {
        let response = send(
            &app,
            json_request("POST", "/equipment", Some(&cookie), json!({"name": name})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let list = body_json(send(&app, empty_request("GET", "/equipment", None)).await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Barbell", "Kettlebell"]);

    let id = list[0]["id"].as_str().unwrap();
    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/equipment/{id}"),
            Some(&cookie),
            json!({"name": "Olympic Barbell"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Olympic Barbell");
}

#[tokio::test]
async fn test_equipment_blank_name_is_rejected() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request("POST", "/equipment", Some(&cookie), json!({"name": "   "})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_equipment_unlinks_exercises() {
    let pool = common::setup_test_db();
    common::insert_reference_data(&pool);
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let created = body_json(
        send(
            &app,
            json_request(
                "POST",
                "/exercises",
                Some(&cookie),
                json!({"name": "Plank", "category": "Strength", "difficulty": "Beginner", "equipment": ["mat"]}),
            ),
        )
        .await,
    )
    .await;

    let response = send(&app, empty_request("DELETE", "/equipment/mat", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let uri = format!("/exercises/{}", created["id"].as_str().unwrap());
    let exercise = body_json(send(&app, empty_request("GET", &uri, None)).await).await;
    assert_eq!(exercise["equipment"], json!([]));
}

#[tokio::test]
async fn test_delete_missing_equipment_is_not_found() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("DELETE", "/equipment/missing", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}
