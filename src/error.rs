//! Error types for the annotation server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::session::{SessionError, StoreError};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to persist annotations: {0}")]
    Persist(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Persist(msg) => {
                // The log stays in memory; surface the full reason so the
                // caller can fix the destination and retry
                tracing::error!("Failed to persist annotations: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "persist_error", msg.clone())
            }
            AppError::Session(SessionError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Session '{}' not found", id),
            ),
            AppError::Session(SessionError::Store(e)) => {
                let status = match e {
                    StoreError::NoPendingSelection
                    | StoreError::DuplicateSelection(_)
                    | StoreError::StaleSelection => StatusCode::CONFLICT,
                    StoreError::UnknownLabel(_) | StoreError::EmptyLabel => {
                        StatusCode::BAD_REQUEST
                    }
                };
                (status, "validation_failed", e.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
