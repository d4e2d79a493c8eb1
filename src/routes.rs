use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::db::DbPool;
use crate::handlers::{auth, equipment, exercises, health, logs, muscles, records, workouts};
use crate::repositories::{
    EquipmentRepository, ExerciseLogRepository, ExerciseRepository, MuscleRepository,
    PersonalRecordRepository, SessionRepository, UserRepository, WorkoutRepository,
};

/// Builds every repository over `pool` and wires them into the router.
pub fn create_app(pool: DbPool) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());

    create_router(
        health::HealthState { pool: pool.clone() },
        auth::AuthState {
            user_repo: user_repo.clone(),
            session_repo: session_repo.clone(),
        },
        exercises::ExercisesState {
            exercise_repo: ExerciseRepository::new(pool.clone()),
        },
        equipment::EquipmentState {
            equipment_repo: EquipmentRepository::new(pool.clone()),
        },
        muscles::MusclesState {
            muscle_repo: MuscleRepository::new(pool.clone()),
        },
        workouts::WorkoutsState {
            workout_repo: WorkoutRepository::new(pool.clone()),
        },
        logs::LogsState {
            log_repo: ExerciseLogRepository::new(pool.clone()),
        },
        records::RecordsState {
            record_repo: PersonalRecordRepository::new(pool),
        },
        session_repo,
        user_repo,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn create_router(
    health_state: health::HealthState,
    auth_state: auth::AuthState,
    exercises_state: exercises::ExercisesState,
    equipment_state: equipment::EquipmentState,
    muscles_state: muscles::MusclesState,
    workouts_state: workouts::WorkoutsState,
    logs_state: logs::LogsState,
    records_state: records::RecordsState,
    session_repo: SessionRepository,
    user_repo: UserRepository,
) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state)
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .with_state(auth_state)
        // Exercise routes
        .route("/exercises", get(exercises::list).post(exercises::create))
        .route("/exercises/latest", get(exercises::latest))
        .route(
            "/exercises/{id}",
            get(exercises::show)
                .put(exercises::update)
                .delete(exercises::delete),
        )
        .with_state(exercises_state)
        // Equipment routes
        .route("/equipment", get(equipment::list).post(equipment::create))
        .route(
            "/equipment/{id}",
            get(equipment::show)
                .put(equipment::update)
                .delete(equipment::delete),
        )
        .with_state(equipment_state)
        // Muscle routes
        .route("/muscles", get(muscles::list).post(muscles::create))
        .route(
            "/muscles/{id}",
            get(muscles::show)
                .put(muscles::update)
                .delete(muscles::delete),
        )
        .with_state(muscles_state)
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/{id}",
            get(workouts::show)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .route("/workouts/{id}/exercises", post(workouts::add_exercise))
        .route(
            "/workouts/{id}/exercises/{workout_exercise_id}",
            put(workouts::update_exercise).delete(workouts::remove_exercise),
        )
        .route(
            "/workouts/{id}/exercises/{workout_exercise_id}/sets",
            post(workouts::add_set),
        )
        .route(
            "/workouts/{id}/exercises/{workout_exercise_id}/sets/{set_id}",
            put(workouts::update_set).delete(workouts::remove_set),
        )
        .with_state(workouts_state)
        // Exercise log routes
        .route("/logs", get(logs::list).post(logs::create))
        .route("/logs/{id}", get(logs::show).delete(logs::delete))
        .with_state(logs_state)
        // Personal record routes
        .route("/records", get(records::list).post(records::record))
        .route(
            "/records/exercise/{exercise_id}",
            get(records::list_for_exercise),
        )
        .with_state(records_state)
        // Session lookup for the auth extractors
        .layer(Extension(session_repo))
        .layer(Extension(user_repo))
}
