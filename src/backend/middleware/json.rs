/**
 * JSON Body Extractor
 *
 * Wraps `axum::Json` so that an unreadable body (missing fields, bad syntax,
 * wrong content type) is answered with the backend's JSON error shape and a
 * 400 instead of axum's plain-text rejection.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::backend::error::BackendError;

/// JSON request body whose rejection is a `BackendError`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
