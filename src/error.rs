//! Error types for capcloud HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::caption::CaptionError;

/// Result type for HTTP handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caption model service failure (502)
    #[error("Caption service error: {0}")]
    Caption(#[from] CaptionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Io(ref err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Caption(ref err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
