//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::routes::ResponseStatus;
use chipi_core::ChipiError;

/// API error type.
#[derive(Debug, Error)]
#[error("[{status}] {code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

/// Error envelope: `{"status": "error", "message": ..., "code": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: ResponseStatus::Error,
            message: self.message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from chipi-core errors
impl From<ChipiError> for ApiError {
    fn from(err: ChipiError) -> Self {
        let code = err.code().as_str();
        let message = err.public_message();

        match err {
            ChipiError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, code, message),
            ChipiError::InvalidInput { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, code, message)
            }
            other => {
                error!(error = %other, source = ?std::error::Error::source(&other), "Request failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
