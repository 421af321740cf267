//! Error type for HTTP handlers.

use crate::task::services::TaskServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Failures that end a request with a server error.
#[derive(Debug, Error)]
pub enum WebError {
    /// The task service reported a store failure.
    #[error(transparent)]
    Service(#[from] TaskServiceError),

    /// A template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    /// The service returned an outcome the route cannot produce.
    #[error("unexpected outcome: {0}")]
    UnexpectedOutcome(&'static str),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
