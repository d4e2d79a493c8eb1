mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, empty_request, json_request, send};
use fitness_tracker::seed::{seed, DEMO_USER_EMAIL, DEMO_USER_PASSWORD};

#[tokio::test]
async fn test_seeded_catalogue_is_served() {
    let pool = common::setup_test_db();
    seed(&pool).await.unwrap();
    let app = common::create_test_app(pool);

    let muscles = body_json(send(&app, empty_request("GET", "/muscles", None)).await).await;
    assert_eq!(muscles.as_array().unwrap().len(), 15);

    let equipment = body_json(send(&app, empty_request("GET", "/equipment", None)).await).await;
    assert_eq!(equipment.as_array().unwrap().len(), 11);

    let exercises = body_json(
        send(&app, empty_request("GET", "/exercises?order_by=name", None)).await,
    )
    .await;
    let names: Vec<&str> = exercises
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Yoga Flow", "Squats", "Running", "Push-ups", "Pull-ups"]
    );
}

#[tokio::test]
async fn test_seeded_pull_ups_relations() {
    let pool = common::setup_test_db();
    seed(&pool).await.unwrap();
    let app = common::create_test_app(pool);

    let exercises = body_json(
        send(&app, empty_request("GET", "/exercises?order_by=name&skip=4", None)).await,
    )
    .await;
    let uri = format!("/exercises/{}", exercises[0]["id"].as_str().unwrap());
    let pull_ups = body_json(send(&app, empty_request("GET", &uri, None)).await).await;

    assert_eq!(pull_ups["name"], "Pull-ups");
    assert_eq!(pull_ups["equipment"][0]["name"], "Pull-up Bar");
    let secondary: Vec<&str> = pull_ups["muscles"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["role"] == "Secondary")
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(secondary.len(), 2);
    assert!(secondary.contains(&"Core"));
}

#[tokio::test]
async fn test_demo_user_login() {
    let pool = common::setup_test_db();
    seed(&pool).await.unwrap();
    let app = common::create_test_app(pool);

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": DEMO_USER_EMAIL, "password": DEMO_USER_PASSWORD}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Demo User");
}
