/**
 * Authentication Gate
 *
 * Turns an `Authorization` header value into an `AuthResult`:
 *
 * ```text
 * NoHeader / MalformedHeader          -> rejected "No token provided"
 * WellFormedHeader -> decode -> Valid -> authenticated
 *                            -> Invalid or Expired -> rejected "Invalid or expired token"
 * authenticated -> require_role       -> Ok(claims) | Forbidden
 * ```
 *
 * Every path completes within one call. The role check is a separate step
 * layered on top of `authenticate`.
 */

use serde::Serialize;

use crate::backend::auth::claims::{ClaimSet, Role};
use crate::backend::auth::errors::AuthError;
use crate::backend::auth::tokens::TokenCodec;

pub const NO_TOKEN_MESSAGE: &str = "No token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingToken,
    InvalidToken,
}

/// Outcome of evaluating a request's credentials.
///
/// `success` is true exactly when a claim set is present; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<ClaimSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip)]
    rejection: Option<Rejection>,
}

impl AuthResult {
    pub fn authenticated(user: ClaimSet, token: impl Into<String>) -> Self {
        Self {
            success: true,
            user: Some(user),
            token: Some(token.into()),
            message: None,
            rejection: None,
        }
    }

    /// No usable `Authorization` header
    pub fn missing_token() -> Self {
        Self::rejected(Rejection::MissingToken, NO_TOKEN_MESSAGE)
    }

    /// A token was presented but did not decode
    pub fn invalid_token() -> Self {
        Self::rejected(Rejection::InvalidToken, INVALID_TOKEN_MESSAGE)
    }

    fn rejected(kind: Rejection, message: &str) -> Self {
        Self {
            success: false,
            user: None,
            token: None,
            message: Some(message.to_string()),
            rejection: Some(kind),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn user(&self) -> Option<&ClaimSet> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The claim set, or the `AuthError` matching the rejection
    pub fn into_claims(self) -> Result<ClaimSet, AuthError> {
        let rejection = self.rejection();
        self.user.ok_or(rejection)
    }

    fn rejection(&self) -> AuthError {
        match self.rejection {
            Some(Rejection::MissingToken) => AuthError::MissingToken,
            Some(Rejection::InvalidToken) | None => AuthError::InvalidToken,
        }
    }
}

/// Extract the token from a header of the exact shape `Bearer <token>`
pub fn extract_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Authenticate an inbound request from its `Authorization` header value
pub fn authenticate(header: Option<&str>, codec: &TokenCodec) -> AuthResult {
    let Some(token) = header.and_then(extract_bearer) else {
        tracing::debug!("Missing or malformed Authorization header");
        return AuthResult::missing_token();
    };

    match codec.decode(token) {
        Ok(claims) => AuthResult::authenticated(claims, token),
        Err(e) => {
            tracing::warn!("Rejected bearer token: {}", e);
            AuthResult::invalid_token()
        }
    }
}

/// Require the authenticated caller to hold one of `allowed`
pub fn require_role<'a>(result: &'a AuthResult, allowed: &[Role]) -> Result<&'a ClaimSet, AuthError> {
    let Some(user) = result.user() else {
        return Err(result.rejection());
    };
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        tracing::warn!("User {} with role {} denied; requires {:?}", user.email, user.role, allowed);
        Err(AuthError::Forbidden)
    }
}
