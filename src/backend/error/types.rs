/**
 * Backend Error Types
 *
 * This module defines the error types returned by HTTP handlers and by server
 * startup.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Client-visible failures with an explicit status code:
 * - 400 invalid input, duplicates, double likes
 * - 401 missing or invalid credentials
 * - 403 acting on someone else's resource
 * - 404 unknown ids
 *
 * ## Internal Errors
 *
 * Database, hashing, token signing and file-system failures. These map to
 * 500 and their details are logged, never returned.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::server::config::ConfigError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use allynet::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Post not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. invalid request, forbidden)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A blocking task (password hashing) panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_)
            | Self::HashError(_)
            | Self::TokenError(_)
            | Self::IoError(_)
            | Self::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.client_message(),
            _ => "Internal server error".to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// True when `err` is a UNIQUE or PRIMARY KEY violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
