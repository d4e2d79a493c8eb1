use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppJson;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{CreateEquipment, Equipment, UpdateEquipment};
use crate::repositories::EquipmentRepository;

#[derive(Clone)]
pub struct EquipmentState {
    pub equipment_repo: EquipmentRepository,
}

pub async fn list(State(state): State<EquipmentState>) -> Result<AppJson<Vec<Equipment>>> {
    Ok(AppJson(state.equipment_repo.find_all().await?))
}

pub async fn show(
    State(state): State<EquipmentState>,
    Path(id): Path<String>,
) -> Result<AppJson<Option<Equipment>>> {
    Ok(AppJson(state.equipment_repo.find_by_id(&id).await?))
}

pub async fn create(
    State(state): State<EquipmentState>,
    _auth_user: AuthUser,
    AppJson(input): AppJson<CreateEquipment>,
) -> Result<Response> {
    let equipment = state.equipment_repo.create(input.validate()?).await?;
    Ok((StatusCode::CREATED, AppJson(equipment)).into_response())
}

pub async fn update(
    State(state): State<EquipmentState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateEquipment>,
) -> Result<AppJson<Equipment>> {
    let equipment = state.equipment_repo.update(&id, input.validate()?).await?;
    Ok(AppJson(equipment))
}

pub async fn delete(
    State(state): State<EquipmentState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.equipment_repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
