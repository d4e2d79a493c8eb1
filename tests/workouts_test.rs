mod common;

use axum::{http::StatusCode, Router};
use serde_json::{json, Value};

use common::{body_json, empty_request, json_request, send};

async fn create_workout(app: &Router, cookie: &str, name: &str) -> String {
    let response = send(
        app,
        json_request("POST", "/workouts", Some(cookie), json!({"name": name})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn add_exercise(app: &Router, cookie: &str, workout_id: &str, body: Value) -> Value {
    let response = send(
        app,
        json_request(
            "POST",
            &format!("/workouts/{workout_id}/exercises"),
            Some(cookie),
            body,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn detail(app: &Router, cookie: &str, workout_id: &str) -> Value {
    body_json(
        send(
            app,
            empty_request("GET", &format!("/workouts/{workout_id}"), Some(cookie)),
        )
        .await,
    )
    .await
}

fn setup_exercises(pool: &fitness_tracker::db::DbPool) {
    pool.get()
        .unwrap()
        .execute_batch(
            "INSERT INTO fitness_tracker_exercises (id, name, category, difficulty)
                VALUES ('squat', 'Squats', 'Strength', 'Beginner');
             INSERT INTO fitness_tracker_exercises (id, name, category, difficulty)
                VALUES ('bench', 'Bench Press', 'Strength', 'Intermediate');
             INSERT INTO fitness_tracker_exercises (id, name, category, difficulty)
                VALUES ('row', 'Rows', 'Strength', 'Beginner');",
        )
        .unwrap();
}

#[tokio::test]
async fn test_workouts_require_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = send(&app, empty_request("GET", "/workouts", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_workout_detail_orders_exercises_and_sets() {
    let pool = common::setup_test_db();
    setup_exercises(&pool);
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &cookie, "Full Body").await;
    let squat = add_exercise(
        &app,
        &cookie,
        &workout_id,
        json!({"exercise_id": "squat", "target_sets": 3, "target_reps": 5, "target_weight": 100.0}),
    )
    .await;
    add_exercise(&app, &cookie, &workout_id, json!({"exercise_id": "bench"})).await;
    add_exercise(
        &app,
        &cookie,
        &workout_id,
        json!({"exercise_id": "row", "position": 1}),
    )
    .await;

    let squat_id = squat["id"].as_str().unwrap();
    for reps in [5, 5, 3] {
        let response = send(
            &app,
            json_request(
                "POST",
                &format!("/workouts/{workout_id}/exercises/{squat_id}/sets"),
                Some(&cookie),
                json!({"target_reps": reps}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let workout = detail(&app, &cookie, &workout_id).await;
    assert_eq!(workout["name"], "Full Body");

    let exercises = workout["exercises"].as_array().unwrap();
    let order: Vec<(i64, &str)> = exercises
        .iter()
        .map(|e| {
            (
                e["position"].as_i64().unwrap(),
                e["exercise_name"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![(1, "Rows"), (2, "Squats"), (3, "Bench Press")]
    );

    let sets: Vec<i64> = exercises[1]["sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["set_number"].as_i64().unwrap())
        .collect();
    assert_eq!(sets, vec![1, 2, 3]);
    assert_eq!(exercises[1]["target_weight"], 100.0);
}

#[tokio::test]
async fn test_removing_exercise_keeps_positions_contiguous() {
    let pool = common::setup_test_db();
    setup_exercises(&pool);
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &cookie, "Push").await;
    let mut ids = Vec::new();
    for exercise_id in ["squat", "bench", "row"] {
        let added = add_exercise(
            &app,
            &cookie,
            &workout_id,
            json!({"exercise_id": exercise_id}),
        )
        .await;
        ids.push(added["id"].as_str().unwrap().to_string());
    }

    let response = send(
        &app,
        empty_request(
            "DELETE",
            &format!("/workouts/{workout_id}/exercises/{}", ids[0]),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let workout = detail(&app, &cookie, &workout_id).await;
    let positions: Vec<i64> = workout["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2]);
}

#[tokio::test]
async fn test_completing_and_removing_sets() {
    let pool = common::setup_test_db();
    setup_exercises(&pool);
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &cookie, "Legs").await;
    let squat = add_exercise(&app, &cookie, &workout_id, json!({"exercise_id": "squat"})).await;
    let sets_uri = format!(
        "/workouts/{workout_id}/exercises/{}/sets",
        squat["id"].as_str().unwrap()
    );

    let mut set_ids = Vec::new();
    for _ in 0..3 {
        let set = body_json(send(&app, json_request("POST", &sets_uri, Some(&cookie), json!({}))).await)
            .await;
        set_ids.push(set["id"].as_str().unwrap().to_string());
    }

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("{sets_uri}/{}", set_ids[2]),
            Some(&cookie),
            json!({"completed_reps": 5, "completed_weight": 102.5, "is_complete": true}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let completed = body_json(response).await;
    assert_eq!(completed["is_complete"], true);
    assert_eq!(completed["completed_weight"], 102.5);

    let response = send(
        &app,
        empty_request("DELETE", &format!("{sets_uri}/{}", set_ids[0]), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let workout = detail(&app, &cookie, &workout_id).await;
    let sets = workout["exercises"][0]["sets"].as_array().unwrap();
    let numbers: Vec<i64> = sets.iter().map(|s| s["set_number"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(sets[1]["id"], set_ids[2].as_str());
    assert_eq!(sets[1]["is_complete"], true);
}

#[tokio::test]
async fn test_unknown_exercise_conflicts() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &cookie, "Empty").await;
    let response = send(
        &app,
        json_request(
            "POST",
            &format!("/workouts/{workout_id}/exercises"),
            Some(&cookie),
            json!({"exercise_id": "missing"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_other_users_workout_is_hidden() {
    let pool = common::setup_test_db();
    setup_exercises(&pool);
    let owner = common::signed_in(&pool, "owner@example.com").await;
    let other = common::signed_in(&pool, "other@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &owner, "Private").await;
    let uri = format!("/workouts/{workout_id}");

    assert_eq!(detail(&app, &other, &workout_id).await, Value::Null);

    let response = send(
        &app,
        json_request("PUT", &uri, Some(&other), json!({"name": "Mine now"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        json_request(
            "POST",
            &format!("{uri}/exercises"),
            Some(&other),
            json!({"exercise_id": "squat"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(send(&app, empty_request("GET", "/workouts", Some(&other))).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_delete_workout() {
    let pool = common::setup_test_db();
    let cookie = common::signed_in(&pool, "user@example.com").await;
    let app = common::create_test_app(pool);

    let workout_id = create_workout(&app, &cookie, "Short-lived").await;
    let uri = format!("/workouts/{workout_id}");

    let response = send(&app, empty_request("DELETE", &uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(detail(&app, &cookie, &workout_id).await, Value::Null);
}
