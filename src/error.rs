// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Form input failed validation. Carries the joined per-field messages.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication required")]
    Unauthorized,

    /// Missing or unusable startup configuration (e.g. no API key).
    /// Distinct from a runtime generation failure.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The completion API call failed or returned an empty response.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The completion returned something that is not the expected JSON
    /// after fence-stripping. Carries the raw text for diagnostics.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Auth collaborator (GoTrue-style service) error.
    #[error("Auth service error: {0}")]
    AuthApi(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid input", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required", None),
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error",
                    Some(msg.clone()),
                )
            }
            AppError::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate reading",
                Some(msg.clone()),
            ),
            AppError::MalformedResponse(raw) => {
                tracing::error!(raw = %raw, "Failed to parse model response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse model response",
                    Some(raw.clone()),
                )
            }
            AppError::AuthApi(msg) => {
                (StatusCode::BAD_GATEWAY, "Auth service error", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error",
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
