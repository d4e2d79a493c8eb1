use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppJson;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{CreateMuscle, Muscle, UpdateMuscle};
use crate::repositories::MuscleRepository;

#[derive(Clone)]
pub struct MusclesState {
    pub muscle_repo: MuscleRepository,
}

pub async fn list(State(state): State<MusclesState>) -> Result<AppJson<Vec<Muscle>>> {
    Ok(AppJson(state.muscle_repo.find_all().await?))
}

pub async fn show(
    State(state): State<MusclesState>,
    Path(id): Path<String>,
) -> Result<AppJson<Option<Muscle>>> {
    Ok(AppJson(state.muscle_repo.find_by_id(&id).await?))
}

pub async fn create(
    State(state): State<MusclesState>,
    _auth_user: AuthUser,
    AppJson(input): AppJson<CreateMuscle>,
) -> Result<Response> {
    let muscle = state.muscle_repo.create(input.validate()?).await?;
    Ok((StatusCode::CREATED, AppJson(muscle)).into_response())
}

pub async fn update(
    State(state): State<MusclesState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateMuscle>,
) -> Result<AppJson<Muscle>> {
    let muscle = state.muscle_repo.update(&id, input.validate()?).await?;
    Ok(AppJson(muscle))
}

pub async fn delete(
    State(state): State<MusclesState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.muscle_repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
