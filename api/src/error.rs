//! Unified error types for the blog API
//!
//! This module defines error types for each layer:
//! - `ValidationError`: a value object rejected its input
//! - `DomainError`: an aggregate refused a state transition
//! - `RepositoryError`: the storage engine failed or returned unreadable rows
//! - `DispatchError`: the command/query dispatcher is mis-wired
//! - `AppError`: application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Raised by value object constructors on out-of-contract input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid identifier '{0}': expected 36 character hyphenated UUID")]
    Identifier(String),

    #[error("Title must be between {min} and {max} characters, got {len}")]
    TitleLength { len: usize, min: usize, max: usize },

    #[error("Content must be at least {min} characters, got {len}")]
    ContentTooShort { len: usize, min: usize },

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("Invalid email address: {0}")]
    Email(String),

    #[error("Unknown post status: {0}")]
    Status(String),

    #[error("Unknown role: {0}")]
    Role(String),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),
}

/// Business rule violations raised by aggregate behaviour methods
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Post is already published")]
    AlreadyPublished,

    #[error("Only published posts can be archived")]
    NotPublished,

    #[error("Post is already archived")]
    AlreadyArchived,

    #[error("Inconsistent aggregate state: {0}")]
    InconsistentState(String),
}

/// Storage failures, propagated untouched by the application layer
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Corrupt {entity} row {id}: {reason}")]
    Corrupt {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

/// Dispatcher wiring defects. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No handler registered for {0}")]
    NoHandler(&'static str),

    #[error("A handler is already registered for {0}")]
    DuplicateHandler(&'static str),
}

/// Application layer errors - returned by handlers and rendered by controllers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(_)
            | AppError::Conflict(_)
            | AppError::Repository(RepositoryError::UniqueViolation(_)) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Repository(_) | AppError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, details) = match &self {
            AppError::Validation(e) => ("Validation error", Some(e.to_string())),
            AppError::Domain(e) => ("Domain rule violated", Some(e.to_string())),
            AppError::NotFound(msg) => ("Not found", Some(msg.clone())),
            AppError::Conflict(msg) => ("Conflict", Some(msg.clone())),
            AppError::Unauthorized(msg) => ("Unauthorized", Some(msg.clone())),
            AppError::Repository(e @ RepositoryError::UniqueViolation(_)) => {
                ("Conflict", Some(e.to_string()))
            }
            AppError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                ("Internal server error", None)
            }
            AppError::Dispatch(e) => {
                tracing::error!("Dispatcher misconfigured: {}", e);
                ("Internal server error", None)
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
