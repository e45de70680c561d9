//! Repository Module
//!
//! CRUD operations per SurrealDB table. All lookups required by the core
//! live here: by-id and by-name for employees, by-id for departments, and
//! the by-employee / by-date-range / exists-per-day set for time entries.

pub mod department;
pub mod employee;
pub mod time_entry;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use time_entry::TimeEntryRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // A unique-index violation surfaces as an index error; classify it as
        // a duplicate so callers can map it to a 409 instead of a 500.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings across the whole stack
// =============================================================================
//
// All ids are surrealdb::RecordId:
//   - parse:  let id: RecordId = "employee:abc".parse()?;
//   - create: let id = RecordId::from_table_key("employee", "abc");
//   - CRUD:   db.select(id) / db.delete(id) take RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
