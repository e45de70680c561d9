//! Timesheet Server
//!
//! An employee time-tracking service: a hierarchy-aware time-entry ledger
//! with per-record authorization and bulk CSV exchange, backed by embedded
//! SurrealDB.
//!
//! # Module layout
//!
//! ```text
//! src/
//! ├── core/          # configuration, state, server, seeding
//! ├── auth/          # JWT authentication
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── hierarchy.rs   # chief/subordinate adjacency model
//! ├── access.rs      # permission evaluator
//! ├── ledger/        # time-entry operations
//! ├── transfer/      # CSV import/export
//! └── utils/         # errors, logging
//! ```

pub mod access;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod hierarchy;
pub mod ledger;
pub mod transfer;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use hierarchy::OrgTree;
pub use ledger::TimeEntryLedger;
pub use transfer::TransferService;
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, configuration, working
/// directories and logging
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = config.log_dir();
    init_logger_with_file(log_level.as_deref(), log_dir.to_str());

    Ok(config)
}
