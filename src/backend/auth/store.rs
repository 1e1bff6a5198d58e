/**
 * Primary User Store
 *
 * This module defines the boundary to the persistent user store and the
 * non-throwing probe used to decide, per request, whether the primary store
 * or the in-memory fallback store serves an authentication request.
 *
 * # Failure Model
 *
 * Every store operation returns `Result<T, StoreError>`. `DuplicateEmail` is a
 * business outcome (409) and never triggers a fallback. `Unavailable` covers
 * connection, timeout and query failures; the orchestrator absorbs it by
 * degrading to the fallback store.
 */

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::StoredUser;

/// Errors reported by a user store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same normalized email already exists
    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    /// The store could not be reached or the operation failed
    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent user store collaborator
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check that a connection to the store can be established
    async fn connect(&self) -> Result<(), StoreError>;

    /// Check that the user records can be accessed
    async fn users_collection(&self) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError>;

    /// Insert a new record. Fails with `DuplicateEmail` on a unique key clash.
    async fn insert_user(&self, user: &StoredUser) -> Result<StoredUser, StoreError>;

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Attempt a connection to the primary store.
///
/// Failures and timeouts are logged and reported as `false`.
pub async fn probe_connect(store: &dyn UserStore, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, store.connect()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!("Primary store connection failed: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!("Primary store connection timed out after {:?}", timeout);
            false
        }
    }
}

/// Decide whether the primary path can be used for this request.
///
/// The connection probe and the record-access check run independently;
/// both must succeed within `timeout`.
pub async fn primary_available(store: &dyn UserStore, timeout: Duration) -> bool {
    let collection = async {
        match tokio::time::timeout(timeout, store.users_collection()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!("Primary store user records unavailable: {}", e);
                false
            }
            Err(_) => {
                tracing::warn!("Primary store record access timed out after {:?}", timeout);
                false
            }
        }
    };

    let (connected, accessible) = tokio::join!(probe_connect(store, timeout), collection);
    connected && accessible
}
