/**
 * Server Configuration
 *
 * This module opens the optional PostgreSQL pool.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. Without
 * `DATABASE_URL` the server runs in fallback-only mode. With it, the pool is
 * created lazily, so a database that is down at startup is picked up once it
 * comes back; until then authentication degrades to the fallback store.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::config::AppConfig;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Create the connection pool and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if `database_url` is set and well-formed
/// - `None` otherwise
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Running with the fallback user store only.");
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(config.probe_timeout())
        .connect_lazy(database_url)
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Running with the fallback user store only.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
