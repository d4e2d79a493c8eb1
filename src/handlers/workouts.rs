use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{AppJson, AppQuery};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{
    AddWorkoutExercise, CreateWorkout, CreateWorkoutSet, PageQuery, UpdateWorkout,
    UpdateWorkoutExercise, UpdateWorkoutSet, Workout, WorkoutDetail, WorkoutExercise, WorkoutSet,
};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<AppJson<Vec<Workout>>> {
    let page = query.validate()?;
    let workouts = state.workout_repo.find_by_user(&auth_user.id, page).await?;
    Ok(AppJson(workouts))
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<AppJson<Option<WorkoutDetail>>> {
    let workout = state.workout_repo.find_detail(&id, &auth_user.id).await?;
    Ok(AppJson(workout))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateWorkout>,
) -> Result<Response> {
    let workout = state
        .workout_repo
        .create(&auth_user.id, input.validate()?)
        .await?;

    tracing::info!("User {} created workout {}", auth_user.id, workout.id);
    Ok((StatusCode::CREATED, AppJson(workout)).into_response())
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateWorkout>,
) -> Result<AppJson<Workout>> {
    let workout = state
        .workout_repo
        .update(&id, &auth_user.id, input.validate()?)
        .await?;
    Ok(AppJson(workout))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.workout_repo.delete(&id, &auth_user.id).await?;
    tracing::info!("User {} deleted workout {}", auth_user.id, id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(workout_id): Path<String>,
    AppJson(input): AppJson<AddWorkoutExercise>,
) -> Result<Response> {
    let workout_exercise = state
        .workout_repo
        .add_exercise(&workout_id, &auth_user.id, input.validate()?)
        .await?;
    Ok((StatusCode::CREATED, AppJson(workout_exercise)).into_response())
}

pub async fn update_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((workout_id, workout_exercise_id)): Path<(String, String)>,
    AppJson(input): AppJson<UpdateWorkoutExercise>,
) -> Result<AppJson<WorkoutExercise>> {
    let workout_exercise = state
        .workout_repo
        .update_exercise(
            &workout_id,
            &workout_exercise_id,
            &auth_user.id,
            input.validate()?,
        )
        .await?;
    Ok(AppJson(workout_exercise))
}

pub async fn remove_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((workout_id, workout_exercise_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .workout_repo
        .remove_exercise(&workout_id, &workout_exercise_id, &auth_user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((workout_id, workout_exercise_id)): Path<(String, String)>,
    AppJson(input): AppJson<CreateWorkoutSet>,
) -> Result<Response> {
    let set = state
        .workout_repo
        .add_set(
            &workout_id,
            &workout_exercise_id,
            &auth_user.id,
            input.targets.validate()?,
        )
        .await?;
    Ok((StatusCode::CREATED, AppJson(set)).into_response())
}

pub async fn update_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((workout_id, workout_exercise_id, set_id)): Path<(String, String, String)>,
    AppJson(input): AppJson<UpdateWorkoutSet>,
) -> Result<AppJson<WorkoutSet>> {
    let set = state
        .workout_repo
        .update_set(
            &workout_id,
            &workout_exercise_id,
            &set_id,
            &auth_user.id,
            input.validate()?,
        )
        .await?;
    Ok(AppJson(set))
}

pub async fn remove_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((workout_id, workout_exercise_id, set_id)): Path<(String, String, String)>,
) -> Result<StatusCode> {
    state
        .workout_repo
        .remove_set(&workout_id, &workout_exercise_id, &set_id, &auth_user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
