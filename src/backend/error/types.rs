/**
 * Backend Error Types
 *
 * This module defines the HTTP-facing error type returned by handlers and
 * middleware.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Request-level problems with an explicit status code, such as an unknown
 * course id.
 *
 * ## Auth Errors
 *
 * The authentication taxonomy (400, 401, 403, 409, 500), passed through with
 * its own status code and message.
 *
 * ## Database Errors
 *
 * Failures of resource queries against the primary store. These are logged
 * with detail and reported as a generic 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::errors::AuthError;
use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Validation error from the shared module
    #[error(transparent)]
    Shared(#[from] SharedError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The primary store is not configured
    #[error("Database not configured")]
    ServiceUnavailable,
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Example
    ///
    /// ```rust
    /// use student_portal::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::NOT_FOUND, "Course not found");
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => err.status_code(),
            Self::Shared(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) => err.user_message(),
            Self::Shared(err) => err.user_message().to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Not found".to_string(),
            Self::Database(_) => "Internal server error".to_string(),
            Self::ServiceUnavailable => "Database not configured".to_string(),
        }
    }
}
