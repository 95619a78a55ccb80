//! Unified error handling.
//!
//! Route handlers catch catalog failures at the view boundary and render
//! inline messages; `AppError` covers what falls through (malformed
//! submissions, session persistence failures) so nothing ever propagates
//! to a blank screen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::session::SessionError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session persistence failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Session(_) => {
                tracing::error!(error = %self, "Request error");
                // Don't expose internal error details to clients
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
        }
    }
}
