//! Error types for Bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Outcome marker carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The request was fulfilled
    Success,
    /// The client sent something the server rejected
    Fail,
    /// The server could not fulfil a valid request
    Error,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Prefix client-facing messages with the action that failed,
    /// e.g. "Failed to add book. readPage must not be greater than pageCount".
    pub fn context(self, action: &str) -> Self {
        match self {
            AppError::NotFound(msg) => AppError::NotFound(format!("{}. {}", action, msg)),
            AppError::Validation(msg) => AppError::Validation(format!("{}. {}", action, msg)),
            AppError::BadRequest(msg) => AppError::BadRequest(format!("{}. {}", action, msg)),
            internal @ AppError::Internal(_) => internal,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ResponseStatus::Fail, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ResponseStatus::Fail, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ResponseStatus::Fail, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseStatus::Error,
                    "Sorry, our server encountered a failure".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            status: kind,
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
