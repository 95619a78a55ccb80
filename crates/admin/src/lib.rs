//! Fake Store Admin library.
//!
//! This crate provides the admin panel as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires configuration,
//! tracing, and graceful shutdown around [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the upstream API.
async fn health() -> &'static str {
    "ok"
}
