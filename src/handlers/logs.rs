use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{AppJson, AppQuery};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{CreateExerciseLog, ExerciseLogQuery, ExerciseLogWithExercise};
use crate::repositories::ExerciseLogRepository;

#[derive(Clone)]
pub struct LogsState {
    pub log_repo: ExerciseLogRepository,
}

pub async fn list(
    State(state): State<LogsState>,
    auth_user: AuthUser,
    AppQuery(query): AppQuery<ExerciseLogQuery>,
) -> Result<AppJson<Vec<ExerciseLogWithExercise>>> {
    let page = query.page()?;
    let logs = state
        .log_repo
        .find_by_user(&auth_user.id, query.exercise_id, page)
        .await?;
    Ok(AppJson(logs))
}

pub async fn show(
    State(state): State<LogsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<AppJson<Option<ExerciseLogWithExercise>>> {
    Ok(AppJson(state.log_repo.find_by_id(&id, &auth_user.id).await?))
}

/// Responds with the log and any personal records it set.
pub async fn create(
    State(state): State<LogsState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateExerciseLog>,
) -> Result<Response> {
    let logged = state
        .log_repo
        .create(&auth_user.id, input.validate()?)
        .await?;

    for record in &logged.new_records {
        tracing::info!(
            "User {} set a {} record of {} on exercise {}",
            auth_user.id,
            record.record_type.as_str(),
            record.value,
            record.exercise_id
        );
    }
    Ok((StatusCode::CREATED, AppJson(logged)).into_response())
}

pub async fn delete(
    State(state): State<LogsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.log_repo.delete(&id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
