//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to convert errors to JSON failure bodies carrying both a
//! human-readable message and a machine-readable `kind`.
//!
//! Error mappings:
//! - `InvalidRequest`, `InvalidRepository` → 400
//! - `PathNotAllowed` → 403
//! - `Timeout` → 504
//! - `Cancelled` → 503
//! - `CommandFailed`, `Git`, `Io`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid repository: {0}")]
    InvalidRepository(String),

    #[error("Path not allowed: {0}")]
    PathNotAllowed(String),

    #[error("Git command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Git command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Git command cancelled")]
    Cancelled,

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable identifier sent to clients alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::InvalidRepository(_) => "invalid_repository",
            AppError::PathNotAllowed(_) => "path_not_allowed",
            AppError::CommandFailed { .. } => "command_failed",
            AppError::Timeout(_) => "timeout",
            AppError::Cancelled => "cancelled",
            AppError::Git(_) | AppError::Io(_) | AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::InvalidRepository(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PathNotAllowed(_) => StatusCode::FORBIDDEN,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CommandFailed { .. }
            | AppError::Git(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{}", self);
        } else {
            tracing::debug!(kind = self.kind(), "{}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
