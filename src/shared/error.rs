//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Every error carries an [`ErrorKind`]; the HTTP status is looked up from the
//! kind, and the response envelope follows the public API contract:
//! `{"status": "fail", "message": ...}` for client errors and
//! `{"status": "error", "message": ...}` for server faults.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::ThreadDetailError;

/// Message returned to clients for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "an internal server error occurred";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error classification used for status-code lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Invariant,
    Authentication,
    Authorization,
    NotFound,
    Server,
}

impl ErrorKind {
    /// HTTP status for this kind of error.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Invariant => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope status string: `fail` for client errors, `error` for server faults.
    pub fn envelope_status(self) -> &'static str {
        match self {
            ErrorKind::Server => "error",
            _ => "fail",
        }
    }
}

impl AppError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => ErrorKind::Invariant,
            AppError::Unauthorized(_) => ErrorKind::Authentication,
            AppError::Forbidden(_) => ErrorKind::Authorization,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Internal(_) | AppError::Database(_) => ErrorKind::Server,
        }
    }

    /// Message safe to show to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) | AppError::Database(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ThreadDetailError> for AppError {
    fn from(err: ThreadDetailError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        let body = ErrorResponse {
            status: kind.envelope_status(),
            message: self.client_message(),
        };

        (kind.status_code(), Json(body)).into_response()
    }
}
