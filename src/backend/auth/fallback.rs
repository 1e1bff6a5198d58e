/**
 * Fallback User Store
 *
 * In-memory, process-lifetime user store used when the primary store cannot
 * be reached. It is owned by `AuthService` and shared between requests with
 * `Arc`; nothing is persisted and everything is lost on restart.
 *
 * # Concurrency
 *
 * Records live behind a single `RwLock`. Every mutation takes the write lock,
 * so the uniqueness check and the insert of `insert` are one atomic step: of
 * several concurrent inserts for the same email exactly one succeeds.
 *
 * The operation log is append-only and best-effort. Logging never fails the
 * caller, a poisoned lock is recovered.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::backend::auth::claims::Role;
use crate::backend::auth::passwords::{PasswordError, PasswordHasher};
use crate::backend::auth::store::StoreError;
use crate::backend::auth::users::{StoredUser, UserProfile};

/// Password shared by all demo accounts
pub const DEMO_PASSWORD: &str = "password123";

const DEMO_ACCOUNTS: [(&str, &str, Role); 3] = [
    ("Demo Student", "student@demo.edu", Role::Student),
    ("Demo Faculty", "faculty@demo.edu", Role::Faculty),
    ("Demo Admin", "admin@demo.edu", Role::Admin),
];

/// Kind of event recorded in the operation log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Registration,
    Login,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Registration => f.write_str("Registration"),
            OperationKind::Login => f.write_str("Login"),
        }
    }
}

#[derive(Debug, Default)]
pub struct FallbackStore {
    users: RwLock<HashMap<String, StoredUser>>,
    operations: Mutex<Vec<String>>,
}

impl FallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the student, faculty and admin demo accounts
    pub async fn with_demo_accounts(hasher: &PasswordHasher) -> Result<Self, PasswordError> {
        let store = Self::new();
        let digest = hasher.hash(DEMO_PASSWORD).await?;
        {
            let mut users = store.users.write().await;
            for (name, email, role) in DEMO_ACCOUNTS {
                let user = StoredUser::new(name, email, digest.clone(), UserProfile::default())
                    .with_role(role);
                users.insert(user.email.clone(), user);
            }
        }
        tracing::info!("Fallback store seeded with {} demo accounts", DEMO_ACCOUNTS.len());
        Ok(store)
    }

    /// Look up a record by its normalized email. Absence is not an error.
    pub async fn find_by_email(&self, email: &str) -> Option<StoredUser> {
        self.users.read().await.get(email).cloned()
    }

    /// Insert a record keyed by its normalized email
    pub async fn insert(&self, user: StoredUser) -> Result<StoredUser, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    /// Stamp the last-login time. Returns `false` when no such record exists.
    pub async fn update_last_login(&self, email: &str, at: DateTime<Utc>) -> bool {
        match self.users.write().await.get_mut(email) {
            Some(user) => {
                user.last_login = Some(at);
                user.updated_at = at;
                true
            }
            None => false,
        }
    }

    /// Flip the active flag. Records are never removed.
    pub async fn set_active(&self, email: &str, active: bool) -> bool {
        match self.users.write().await.get_mut(email) {
            Some(user) => {
                user.is_active = active;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Append a human-readable entry to the operation log
    pub fn log_operation(&self, kind: OperationKind, email: &str) {
        let entry = format!("{} {}: {}", Utc::now().to_rfc3339(), kind, email);
        match self.operations.lock() {
            Ok(mut log) => log.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }

    /// Snapshot of the operation log, oldest first
    pub fn operations(&self) -> Vec<String> {
        match self.operations.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drop every record and log entry
    pub async fn clear(&self) {
        self.users.write().await.clear();
        match self.operations.lock() {
            Ok(mut log) => log.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
