//! Shared Error Types
//!
//! Errors raised by the platform-agnostic part of the crate: request
//! validation and parsing of enumerated column values. Handlers convert these
//! into `BackendError`, which maps every variant to `400 Bad Request`.
//!
//! # Usage
//!
//! ```rust
//! use allynet::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username is required");
//! assert!(error.to_string().contains("username"));
//! ```
use thiserror::Error;

/// Errors shared by request validation and model parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A request field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A stored or submitted value is outside its enumeration
    #[error("Invalid {kind}: '{value}'")]
    InvalidValue {
        /// Name of the enumeration (e.g. `post type`)
        kind: &'static str,
        /// The offending value
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-value error
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    /// Message suitable for an API error body
    pub fn client_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::InvalidValue { .. } => self.to_string(),
        }
    }
}
