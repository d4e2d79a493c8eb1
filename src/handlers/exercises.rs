use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{AppJson, AppQuery};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{
    CreateExercise, Exercise, ExerciseListQuery, ExerciseWithRelations, UpdateExercise,
};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

pub async fn list(
    State(state): State<ExercisesState>,
    AppQuery(query): AppQuery<ExerciseListQuery>,
) -> Result<AppJson<Vec<Exercise>>> {
    let filter = query.validate()?;
    let exercises = state.exercise_repo.find_all(filter).await?;
    Ok(AppJson(exercises))
}

pub async fn latest(State(state): State<ExercisesState>) -> Result<AppJson<Option<Exercise>>> {
    Ok(AppJson(state.exercise_repo.find_latest().await?))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<AppJson<Option<ExerciseWithRelations>>> {
    Ok(AppJson(state.exercise_repo.find_with_relations(&id).await?))
}

pub async fn create(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateExercise>,
) -> Result<Response> {
    let new_exercise = input.validate()?;
    let id = state.exercise_repo.create(new_exercise).await?;
    let exercise = state
        .exercise_repo
        .find_with_relations(&id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Created exercise {id} is missing")))?;

    tracing::info!("User {} created exercise {}", auth_user.id, id);
    Ok((StatusCode::CREATED, AppJson(exercise)).into_response())
}

pub async fn update(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateExercise>,
) -> Result<AppJson<ExerciseWithRelations>> {
    let changes = input.validate()?;
    state.exercise_repo.update(&id, changes).await?;
    let exercise = state
        .exercise_repo
        .find_with_relations(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    tracing::info!("User {} updated exercise {}", auth_user.id, id);
    Ok(AppJson(exercise))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.exercise_repo.delete(&id).await?;
    tracing::info!("User {} deleted exercise {}", auth_user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
