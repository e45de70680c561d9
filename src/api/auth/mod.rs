//! Auth API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Auth router; login and reg are public, refresh needs a valid token
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/reg", post(handler::register))
        .route("/api/auth/token/refresh", post(handler::refresh))
}
