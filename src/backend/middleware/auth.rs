/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It runs the authentication gate on the
 * `Authorization` header and hands the result to handlers through request
 * extensions.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::errors::AuthError;
use crate::backend::auth::gate::AuthResult;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Authentication middleware
///
/// This middleware:
/// 1. Reads the `Authorization` header
/// 2. Runs the authentication gate
/// 3. Attaches the authenticated result to request extensions
///
/// Returns 401 with "No token provided" or "Invalid or expired token"
/// otherwise.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let result = auth.authenticate(header);
    result.clone().into_claims()?;

    request.extensions_mut().insert(result);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Reads the `AuthResult` left by `auth_middleware`. Used on a route without
/// the middleware it rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthResult);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let result = parts.extensions.get::<AuthResult>().cloned().ok_or_else(|| {
            tracing::warn!("AuthResult not found in request extensions");
            BackendError::from(AuthError::MissingToken)
        })?;

        Ok(AuthUser(result))
    }
}
