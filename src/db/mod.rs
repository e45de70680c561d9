//! Database Module
//!
//! Embedded SurrealDB connection and schema definition.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "timesheet";
const DATABASE: &str = "timesheet";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        Self::prepare(db).await
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (namespace={}, db={})", NAMESPACE, DATABASE);

        Ok(Self { db })
    }
}

/// Define tables and indexes
///
/// The unique index on (employee, work_date) is the authoritative guard for
/// the one-entry-per-day invariant; the ledger's explicit pre-check only
/// exists to produce a friendly conflict message before the index fires.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS department SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_department_name ON TABLE department COLUMNS name UNIQUE;

        DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_employee_name ON TABLE employee COLUMNS name UNIQUE;

        DEFINE TABLE IF NOT EXISTS time_entry SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_entry_per_day ON TABLE time_entry COLUMNS employee, work_date UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;

    Ok(())
}
