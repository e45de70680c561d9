//! Core Module
//!
//! Server assembly: configuration, shared state, the HTTP server and the
//! startup seeding of the admin account.

pub mod config;
pub mod seed;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
