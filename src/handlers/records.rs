use axum::extract::{Path, State};

use super::AppJson;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{PersonalRecord, PersonalRecordWithExercise, RecordOutcome, SubmitPersonalRecord};
use crate::repositories::PersonalRecordRepository;

#[derive(Clone)]
pub struct RecordsState {
    pub record_repo: PersonalRecordRepository,
}

pub async fn list(
    State(state): State<RecordsState>,
    auth_user: AuthUser,
) -> Result<AppJson<Vec<PersonalRecordWithExercise>>> {
    Ok(AppJson(state.record_repo.list_for_user(&auth_user.id).await?))
}

pub async fn list_for_exercise(
    State(state): State<RecordsState>,
    auth_user: AuthUser,
    Path(exercise_id): Path<String>,
) -> Result<AppJson<Vec<PersonalRecord>>> {
    let records = state
        .record_repo
        .list_for_exercise(&auth_user.id, &exercise_id)
        .await?;
    Ok(AppJson(records))
}

/// Responds 200 either way; `improved` tells whether the stored value changed.
pub async fn record(
    State(state): State<RecordsState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<SubmitPersonalRecord>,
) -> Result<AppJson<RecordOutcome>> {
    let outcome = state
        .record_repo
        .record(&auth_user.id, input.validate()?)
        .await?;
    Ok(AppJson(outcome))
}
