//! Employee API Handlers
//!
//! Admin CRUD over employees. Chief changes are validated against the
//! hierarchy so the forest invariant cannot be broken through the API.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::db::repository::{DepartmentRepository, EmployeeRepository};
use crate::hierarchy::OrgTree;
use crate::utils::{AppError, AppResult};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all().await?;
    Ok(Json(employees))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Create an employee (any role)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let departments = DepartmentRepository::new(state.get_db());
    departments
        .find_by_id(&payload.department.to_string())
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Department {} not found", payload.department))
        })?;

    let repo = EmployeeRepository::new(state.get_db());
    if let Some(chief) = &payload.chief {
        repo.find_by_id(&chief.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Chief {} not found", chief)))?;
    }

    let employee = repo.create(payload).await?;
    Ok(Json(employee))
}

/// Update an employee
///
/// A chief change runs through [`OrgTree::validate_chief_assignment`] to
/// reject self-reference and cycles before it reaches storage.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());

    if let Some(Some(chief_id)) = &payload.chief {
        repo.find_by_id(chief_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Chief {} not found", chief_id)))?;

        let all = repo.find_all().await?;
        let tree = OrgTree::from_employees(&all);
        tree.validate_chief_assignment(&id, chief_id)?;
    }

    let employee = repo.update(&id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee; their direct subordinates are detached first
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.get_db());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
