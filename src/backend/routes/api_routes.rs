/**
 * API Route Configuration
 *
 * # Public Routes
 *
 * - `POST /api/auth/register` - Account registration
 * - `POST /api/auth/login` - User authentication
 * - `GET /api/health` - Liveness and serving store
 *
 * # Protected Routes (bearer token required)
 *
 * - `GET /api/auth/me` - Current user claims
 * - `GET /api/courses`, `POST /api/courses` (admin)
 * - `GET /api/courses/{id}`
 * - `GET /api/courses/{id}/assignments`
 * - `GET /api/courses/{id}/materials`
 * - `GET /api/grades`
 */

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::backend::auth::handlers::{get_me, login, register};
use crate::backend::auth::service::AuthService;
use crate::backend::middleware::auth_middleware;
use crate::backend::portal::{
    create_course, get_course, list_assignments, list_courses, list_grades, list_materials,
};
use crate::backend::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// "primary" or "fallback"
    pub storage: &'static str,
}

/// Report which store would serve an authentication request right now
pub async fn health(State(auth): State<Arc<AuthService>>) -> Json<HealthResponse> {
    let storage = if auth.primary_available().await {
        "primary"
    } else {
        "fallback"
    };
    Json(HealthResponse {
        status: "ok",
        storage,
    })
}

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/courses", get(list_courses).post(create_course))
        .route("/api/courses/{id}", get(get_course))
        .route("/api/courses/{id}/assignments", get(list_assignments))
        .route("/api/courses/{id}/materials", get(list_materials))
        .route("/api/grades", get(list_grades))
        .route_layer(middleware::from_fn_with_state(
            app_state.auth.clone(),
            auth_middleware,
        ));

    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/health", get(health))
        .merge(protected)
}
