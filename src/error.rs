//! Unified error types for the info service and the inventory adapter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Top-level error type for process startup and the binaries.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Inventory adapter error, shown as-is.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Errors surfaced by the HTTP handlers.
///
/// Each variant renders as a JSON body with a matching status code and is
/// logged at the severity an operator would expect.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No route matched the request path.
    #[error("no route for {path}")]
    NotFound {
        /// The percent-decoded requested path.
        path: String,
    },

    /// A handler failed. The cause is logged, never sent to the client.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Create an internal error from any displayable cause.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }
}

/// JSON body for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Short error name, e.g. "Not Found".
    pub error: &'static str,
    /// Human-readable description.
    pub message: &'static str,
    /// Requested path (404 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorResponse {
    /// Body for an unmatched route.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self {
            error: "Not Found",
            message: "The requested endpoint does not exist",
            path: Some(path.into()),
        }
    }

    /// Generic body for any internal fault.
    pub fn internal() -> Self {
        Self {
            error: "Internal Server Error",
            message: "An unexpected error occurred",
            path: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { path } => {
                warn!("404 error: {}", path);
                (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found(path))).into_response()
            }
            ApiError::Internal(cause) => {
                error!("500 error: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
            }
        }
    }
}

/// Inventory adapter errors.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The cloud CLI binary could not be found.
    #[error("Error: '{program}' CLI not found. Install it first.")]
    ToolMissing {
        /// Program that was looked up.
        program: String,
    },

    /// The cloud CLI ran but exited unsuccessfully.
    #[error("Error calling {program}: {stderr}")]
    ToolFailed {
        /// Program that failed.
        program: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The CLI could not be started for a reason other than absence.
    #[error("Error running {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CLI output was not the expected JSON.
    #[error("Error parsing CLI output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
