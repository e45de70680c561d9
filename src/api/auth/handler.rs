//! Authentication Handlers
//!
//! Login, self-registration and token refresh.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, Position, Role};
use crate::db::repository::{DepartmentRepository, EmployeeRepository};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub position: Position,
    pub department_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chief_id: Option<String>,
    pub created_at: i64,
}

impl From<Employee> for UserInfo {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id_string(),
            name: employee.name,
            role: employee.role,
            position: employee.position,
            department_id: employee.department.to_string(),
            chief_id: employee.chief.as_ref().map(|c| c.to_string()),
            created_at: employee.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 50, message = "Name must be 5 to 50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Password must be 1 to 255 characters"))]
    pub password: String,
    pub position: Position,
    pub department_id: String,
    pub chief_id: Option<String>,
}

/// Login handler
///
/// Verifies credentials and returns a JWT. The error message is the same
/// for an unknown name and a wrong password, and a fixed delay runs before
/// either outcome.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let employees = EmployeeRepository::new(state.get_db());
    let employee = employees.find_by_name(&req.name).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let employee = match employee {
        Some(employee) => {
            let password_valid = employee
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(target: "security", name = %req.name, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            employee
        }
        None => {
            tracing::warn!(target: "security", name = %req.name, "Login failed - employee not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service()
        .generate_token(&employee.id_string(), &employee.name, employee.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(employee = %employee.name, role = %employee.role.as_str(), "Employee logged in");

    Ok(Json(LoginResponse {
        token,
        user: employee.into(),
    }))
}

/// Self-registration handler
///
/// Always creates a USER; admin accounts only come from seeding or the
/// admin CRUD. The department must exist, and the chief (when given) must
/// name an existing employee.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let departments = DepartmentRepository::new(state.get_db());
    let department = departments
        .find_by_id(&req.department_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department {} not found", req.department_id)))?;
    let department_id = department
        .id
        .ok_or_else(|| AppError::internal("Department record has no id"))?;

    let employees = EmployeeRepository::new(state.get_db());
    let chief = match &req.chief_id {
        Some(chief_id) => {
            let chief = employees
                .find_by_id(chief_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Chief {} not found", chief_id)))?;
            chief.id
        }
        None => None,
    };

    let created = employees
        .create(EmployeeCreate {
            name: req.name,
            password: req.password,
            role: Role::User,
            position: req.position,
            department: department_id,
            chief,
        })
        .await?;

    tracing::info!(employee = %created.name, "Employee registered");
    Ok(Json(created.into()))
}

/// Token refresh handler
///
/// Issues a fresh token from the current one, re-reading the employee so a
/// role change since login takes effect.
pub async fn refresh(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<LoginResponse>> {
    let employees = EmployeeRepository::new(state.get_db());
    let employee = employees
        .find_by_id(&user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state
        .jwt_service()
        .generate_token(&employee.id_string(), &employee.name, employee.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        user: employee.into(),
    }))
}
