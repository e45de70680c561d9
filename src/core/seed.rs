//! Startup seeding
//!
//! Creates the admin account (and its department) on first start so a fresh
//! installation is immediately usable. Running again is a no-op.

use crate::core::ServerState;
use crate::db::models::{EmployeeCreate, Position, Role};
use crate::db::repository::{DepartmentRepository, EmployeeRepository};
use crate::utils::{AppError, AppResult};

const ADMIN_DEPARTMENT: &str = "Development";

/// Ensure the configured admin account exists
pub async fn ensure_admin(state: &ServerState) -> AppResult<()> {
    let employees = EmployeeRepository::new(state.get_db());
    let departments = DepartmentRepository::new(state.get_db());

    if employees
        .find_by_name(&state.config.admin_name)
        .await?
        .is_some()
    {
        tracing::info!(target: "seed", admin = %state.config.admin_name, "Admin account already exists");
        return Ok(());
    }

    let department = match departments.find_by_name(ADMIN_DEPARTMENT).await? {
        Some(department) => department,
        None => departments.create(ADMIN_DEPARTMENT).await?,
    };
    let department_id = department
        .id
        .ok_or_else(|| AppError::internal("Department record has no id"))?;

    employees
        .create(EmployeeCreate {
            name: state.config.admin_name.clone(),
            password: state.config.admin_password.clone(),
            role: Role::Admin,
            position: Position::Developer,
            department: department_id,
            chief: None,
        })
        .await?;

    tracing::info!(target: "seed", admin = %state.config.admin_name, "Admin account created");
    Ok(())
}
