/**
 * Authentication Errors
 *
 * The error taxonomy surfaced by the authentication flows. Store
 * unavailability is deliberately absent: it is absorbed by degrading to the
 * fallback store and never reaches the caller by itself.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::gate::{INVALID_TOKEN_MESSAGE, NO_TOKEN_MESSAGE};
use crate::backend::auth::passwords::PasswordError;
use crate::backend::auth::tokens::TokenError;
use crate::shared::SharedError;

/// Message returned for both unknown emails and wrong passwords
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed email, weak password, missing field (400)
    #[error("{0}")]
    InputValidation(String),

    /// Unknown email or wrong password (401)
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Correct credentials for a deactivated account (401)
    #[error("Account is deactivated")]
    AccountDisabled,

    /// Missing header (401)
    #[error("{}", NO_TOKEN_MESSAGE)]
    MissingToken,

    /// Malformed or expired token (401)
    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,

    /// Role check failed (403)
    #[error("Insufficient permissions")]
    Forbidden,

    /// Email already registered (409)
    #[error("User with this email already exists")]
    Conflict,

    /// Anything else (500). The detail is logged, never shown.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InputValidation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::AccountDisabled
            | Self::MissingToken
            | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn user_message(&self) -> String {
        match self {
            Self::Unexpected(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<SharedError> for AuthError {
    fn from(err: SharedError) -> Self {
        Self::InputValidation(err.user_message().to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MalformedToken | TokenError::Expired => Self::InvalidToken,
            TokenError::Encode(detail) => Self::Unexpected(detail),
        }
    }
}
