use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::ledger::TimeEntryLedger;
use crate::transfer::TransferService;
use crate::utils::AppResult;

/// Shared server state
///
/// Holds the configuration, the embedded database handle and the JWT
/// service. Cloning is cheap; the services built from it are
/// request-scoped and stateless.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded SurrealDB handle
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the state: working directories, database, schema, JWT
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| crate::utils::AppError::internal(format!(
                "Failed to create working directory structure: {}",
                e
            )))?;

        let db_path = config.database_dir().join("timesheet.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// In-memory state for tests
    pub async fn memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config, db_service.db, jwt_service))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn ledger(&self) -> TimeEntryLedger {
        TimeEntryLedger::new(self.db.clone())
    }

    pub fn transfer(&self) -> TransferService {
        TransferService::new(self.ledger())
    }
}
