//! CSV API Module
//!
//! - POST /api/csv/import — multipart upload of a .csv file
//! - GET /api/csv/export — download the accessible entries as CSV

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/csv/import", post(handler::import))
        .route("/api/csv/export", get(handler::export))
}
