/**
 * Application State
 *
 * Shared state handed to every handler. Handlers extract only the part they
 * need through `FromRef`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::service::AuthService;

#[derive(Clone)]
pub struct AppState {
    /// Login, registration and token checks
    pub auth: Arc<AuthService>,

    /// Primary store pool; `None` when no database is configured
    pub db_pool: Option<PgPool>,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
