/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly, and
 * the mapping of axum's JSON body rejections onto the same error shape.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Invalid email or password",
 *   "status": 401
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::errors::AuthError;
use crate::backend::error::types::BackendError;

/// Unreadable request bodies are input-validation failures (400)
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());

        let message = match rejection {
            JsonRejection::JsonDataError(_) => "Request body is missing required fields or has invalid values",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
            _ => "Failed to read request body",
        };
        Self::Auth(AuthError::InputValidation(message.to_string()))
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "message": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
