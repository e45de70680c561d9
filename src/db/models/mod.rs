//! Database Models
//!
//! Typed records matching the SurrealDB schema plus their create/update payloads.

pub mod department;
pub mod employee;
pub mod serde_helpers;
pub mod time_entry;

pub use department::{Department, DepartmentId};
pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate, Position, Role};
pub use time_entry::{TimeEntry, TimeEntryId};
