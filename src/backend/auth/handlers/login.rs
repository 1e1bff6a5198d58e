/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Validate the email shape and that a password was given
 * 2. Look the user up in the primary store, or in the fallback store when
 *    the primary store is unavailable
 * 3. Verify the password and the active flag
 * 4. Return a token and the public user info
 *
 * # Security
 *
 * - Unknown emails and wrong passwords get the same 401 message
 * - Passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::service::{AuthService, ServedBy};
use crate::backend::error::BackendError;
use crate::backend::middleware::JsonBody;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Unreadable body, malformed email or empty password
/// * `401 Unauthorized` - Invalid credentials or deactivated account
/// * `500 Internal Server Error` - Token generation failed
///
/// # Example Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "user": { "id": "…", "name": "Ann", "email": "ann@x.com", "role": "student" },
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    let outcome = auth.login(&request.into()).await?;

    let message = match outcome.served_by {
        ServedBy::Primary => "Login successful",
        ServedBy::Fallback => "Login successful (offline mode)",
    };
    tracing::info!("User logged in successfully: {} ({:?})", outcome.user.email, outcome.served_by);

    Ok(Json(AuthResponse {
        success: true,
        message: message.to_string(),
        user: Some(UserResponse::from(&outcome.user)),
        token: Some(outcome.token),
    }))
}
