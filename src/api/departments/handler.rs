//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Department;
use crate::db::repository::DepartmentRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
}

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    let repo = DepartmentRepository::new(state.get_db());
    let departments = repo.find_all().await?;
    Ok(Json(departments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    let repo = DepartmentRepository::new(state.get_db());
    let department = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department {} not found", id)))?;
    Ok(Json(department))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    let repo = DepartmentRepository::new(state.get_db());
    let department = repo.create(&payload.name).await?;
    Ok(Json(department))
}
