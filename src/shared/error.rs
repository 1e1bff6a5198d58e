//! Shared Error Types
//!
//! This module defines error types that are produced by the platform-agnostic
//! helpers in `shared` and consumed by the backend.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed an input check
//!
//! # Usage
//!
//! ```rust
//! use student_portal::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Please provide a valid email address");
//! assert_eq!(error.field(), "email");
//! ```
use thiserror::Error;

/// Shared error types raised while checking client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
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

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }

    /// Message suitable for returning to the client
    pub fn user_message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}
