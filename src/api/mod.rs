//! API Route Modules
//!
//! - [`auth`] - login, registration, token refresh
//! - [`health`] - health check
//! - [`employees`] - employee management (admin)
//! - [`departments`] - department management
//! - [`entries`] - time entry CRUD and queries
//! - [`transfer`] - CSV import/export

pub mod auth;
pub mod departments;
pub mod employees;
pub mod entries;
pub mod health;
pub mod transfer;

pub use crate::utils::{AppResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::EmployeeRepository;
use crate::utils::AppError;

/// Load the employee record behind an authenticated user
///
/// A token naming a deleted employee fails authentication rather than
/// surfacing a not-found error.
pub(crate) async fn resolve_actor(
    state: &ServerState,
    user: &CurrentUser,
) -> AppResult<Employee> {
    EmployeeRepository::new(state.get_db())
        .find_by_id(&user.id)
        .await?
        .ok_or(AppError::Unauthorized)
}
