/**
 * Get Current User Handler
 *
 * Handler for GET /api/auth/me. Runs behind the auth middleware and answers
 * from the token's claim set alone; no store is consulted.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

pub async fn get_me(AuthUser(auth): AuthUser) -> Result<Json<UserResponse>, BackendError> {
    let claims = auth.into_claims()?;
    Ok(Json(UserResponse::from(&claims)))
}
