/**
 * Register Handler
 *
 * This module implements the account registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password strength
 * 2. Hash the password
 * 3. Store the account in the primary store, or in the fallback store when
 *    the primary store is unavailable
 * 4. Return a token and the public user info
 *
 * New accounts always get the student role.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::auth::service::{AuthService, ServedBy};
use crate::backend::error::BackendError;
use crate::backend::middleware::JsonBody;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Unreadable body, missing name, malformed email or weak password
/// * `409 Conflict` - Email already registered
/// * `500 Internal Server Error` - Hashing or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ann", "email": "ann@x.com", "password": "secret1" }
/// ```
pub async fn register(
    State(auth): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Registration request for: {}", request.email);

    let outcome = auth.register(&request.into()).await?;

    let message = match outcome.served_by {
        ServedBy::Primary => "Registration successful",
        ServedBy::Fallback => "Registration successful (offline mode)",
    };
    tracing::info!("User registered: {} ({:?})", outcome.user.email, outcome.served_by);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: message.to_string(),
            user: Some(UserResponse::from(&outcome.user)),
            token: Some(outcome.token),
        }),
    ))
}
