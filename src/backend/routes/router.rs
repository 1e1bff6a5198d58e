/**
 * Router Configuration
 *
 * Creates the main router with API routes, request tracing, CORS and a JSON
 * 404 fallback.
 */

use axum::{http::StatusCode, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the main application router
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = configure_api_routes(Router::new(), &app_state);

    router
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Route not found") })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
