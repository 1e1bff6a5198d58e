/**
 * Server Initialization
 *
 * Builds the application state and router from an `AppConfig`.
 *
 * # Initialization Steps
 *
 * 1. Open the optional PostgreSQL pool and run migrations
 * 2. Choose the token codec
 * 3. Create the fallback store, seeding demo accounts when configured
 * 4. Assemble `AuthService` and `AppState`
 * 5. Build the router
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::backend::auth::fallback::FallbackStore;
use crate::backend::auth::passwords::{PasswordError, PasswordHasher};
use crate::backend::auth::service::AuthService;
use crate::backend::auth::store::UserStore;
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::auth::users::PgUserStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create the application with all routes and state
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, PasswordError> {
    tracing::info!("Initializing student portal backend");

    let db_pool = load_database(config).await;
    let primary = db_pool
        .clone()
        .map(|pool| Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>);

    let app_state = build_state(config, primary, db_pool).await?;
    tracing::info!("Router configured");

    Ok(create_router(app_state))
}

/// Assemble `AppState` around an arbitrary primary store
pub async fn build_state(
    config: &AppConfig,
    primary: Option<Arc<dyn UserStore>>,
    db_pool: Option<PgPool>,
) -> Result<AppState, PasswordError> {
    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let codec = TokenCodec::from_config(config);

    let fallback = if config.seed_demo_accounts {
        FallbackStore::with_demo_accounts(&hasher).await?
    } else {
        FallbackStore::new()
    };

    let auth = AuthService::new(
        primary,
        Arc::new(fallback),
        codec,
        hasher,
        config.probe_timeout(),
    );

    Ok(AppState {
        auth: Arc::new(auth),
        db_pool,
    })
}
