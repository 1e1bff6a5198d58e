/**
 * Authentication Service
 *
 * Orchestrates login and registration across the primary user store and the
 * in-memory fallback store.
 *
 * # Request Flow
 *
 * 1. Validate the input (400, no store access)
 * 2. Probe the primary store; connection and record access must both succeed
 * 3. Run the operation against the primary store
 * 4. If the primary store is unavailable, or fails while the operation runs,
 *    run the same operation against the fallback store
 * 5. Issue a token and return the same shape whichever store served
 *
 * Business outcomes found on the primary store (duplicate email, wrong
 * password) are final and never retried against the fallback store.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::backend::auth::claims::ClaimSet;
use crate::backend::auth::errors::AuthError;
use crate::backend::auth::fallback::{FallbackStore, OperationKind};
use crate::backend::auth::gate::{self, AuthResult};
use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::store::{self, StoreError, UserStore};
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::auth::users::{StoredUser, UserProfile};
use crate::shared::validation::{normalize_email, validate_login, validate_registration};

/// Email and password presented at login
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Details of a new student account
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: UserProfile,
}

/// Which store completed a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedBy {
    Primary,
    Fallback,
}

/// Successful login or registration
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: StoredUser,
    pub token: String,
    pub served_by: ServedBy,
}

pub struct AuthService {
    primary: Option<Arc<dyn UserStore>>,
    fallback: Arc<FallbackStore>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    probe_timeout: Duration,
}

impl AuthService {
    pub fn new(
        primary: Option<Arc<dyn UserStore>>,
        fallback: Arc<FallbackStore>,
        codec: TokenCodec,
        hasher: PasswordHasher,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            codec,
            hasher,
            probe_timeout,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn fallback(&self) -> &Arc<FallbackStore> {
        &self.fallback
    }

    /// Run the authentication gate against an `Authorization` header value
    pub fn authenticate(&self, header: Option<&str>) -> AuthResult {
        gate::authenticate(header, &self.codec)
    }

    /// Whether a request arriving now would be served by the primary store
    pub async fn primary_available(&self) -> bool {
        self.available_primary().await.is_some()
    }

    async fn available_primary(&self) -> Option<&dyn UserStore> {
        let primary = self.primary.as_deref()?;
        if store::primary_available(primary, self.probe_timeout).await {
            Some(primary)
        } else {
            None
        }
    }

    /// Authenticate with email and password
    pub async fn login(&self, request: &Credentials) -> Result<AuthOutcome, AuthError> {
        validate_login(&request.email, &request.password)?;
        let email = normalize_email(&request.email);

        if let Some(primary) = self.available_primary().await {
            match self.login_primary(primary, &email, &request.password).await {
                Ok(outcome) => return self.issue(outcome?, ServedBy::Primary),
                Err(e) => {
                    tracing::warn!("Primary store failed during login for {}: {}. Using fallback store.", email, e);
                }
            }
        }

        let user = self.login_fallback(&email, &request.password).await?;
        self.issue(user, ServedBy::Fallback)
    }

    /// Create a student account
    pub async fn register(&self, request: &Registration) -> Result<AuthOutcome, AuthError> {
        validate_registration(&request.name, &request.email, &request.password)?;
        let email = normalize_email(&request.email);

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = StoredUser::new(request.name.trim(), email, password_hash, request.profile.clone());

        if let Some(primary) = self.available_primary().await {
            match register_primary(primary, &user).await {
                Ok(outcome) => return self.issue(outcome?, ServedBy::Primary),
                Err(e) => {
                    tracing::warn!("Primary store failed during registration for {}: {}. Using fallback store.", user.email, e);
                }
            }
        }

        let user = self.register_fallback(user).await?;
        self.issue(user, ServedBy::Fallback)
    }

    /// Outer `Err` means the store failed and the caller may degrade;
    /// inner `Err` is a final answer.
    async fn login_primary(
        &self,
        primary: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<Result<StoredUser, AuthError>, StoreError> {
        let Some(mut user) = primary.find_user_by_email(email).await? else {
            tracing::warn!("Login for unknown email: {}", email);
            return Ok(Err(AuthError::InvalidCredentials));
        };
        if let Err(e) = self.check_credentials(&user, password).await {
            return Ok(Err(e));
        }

        let now = Utc::now();
        if let Err(e) = primary.update_last_login(user.id, now).await {
            tracing::warn!("Failed to record last login for {}: {}", user.email, e);
        }
        user.last_login = Some(now);
        Ok(Ok(user))
    }

    async fn login_fallback(&self, email: &str, password: &str) -> Result<StoredUser, AuthError> {
        let Some(mut user) = self.fallback.find_by_email(email).await else {
            tracing::warn!("Login for unknown email (fallback store): {}", email);
            return Err(AuthError::InvalidCredentials);
        };
        self.check_credentials(&user, password).await?;

        let now = Utc::now();
        self.fallback.update_last_login(email, now).await;
        self.fallback.log_operation(OperationKind::Login, email);
        user.last_login = Some(now);
        Ok(user)
    }

    async fn register_fallback(&self, user: StoredUser) -> Result<StoredUser, AuthError> {
        if self.fallback.find_by_email(&user.email).await.is_some() {
            tracing::warn!("Email already exists (fallback store): {}", user.email);
            return Err(AuthError::Conflict);
        }
        let user = self.fallback.insert(user).await.map_err(|e| match e {
            StoreError::DuplicateEmail(email) => {
                tracing::warn!("Email already exists (fallback store): {}", email);
                AuthError::Conflict
            }
            StoreError::Unavailable(detail) => AuthError::Unexpected(detail),
        })?;
        self.fallback.log_operation(OperationKind::Registration, &user.email);
        Ok(user)
    }

    /// Password first, so a deactivated account is only revealed to its owner
    async fn check_credentials(&self, user: &StoredUser, password: &str) -> Result<(), AuthError> {
        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::warn!("Invalid password for user: {}", user.email);
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            tracing::warn!("Login attempt for deactivated account: {}", user.email);
            return Err(AuthError::AccountDisabled);
        }
        Ok(())
    }

    fn issue(&self, user: StoredUser, served_by: ServedBy) -> Result<AuthOutcome, AuthError> {
        let token = self.codec.encode(&ClaimSet::from(&user)).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            AuthError::from(e)
        })?;
        Ok(AuthOutcome {
            user,
            token,
            served_by,
        })
    }
}

async fn register_primary(
    primary: &dyn UserStore,
    user: &StoredUser,
) -> Result<Result<StoredUser, AuthError>, StoreError> {
    if primary.find_user_by_email(&user.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", user.email);
        return Ok(Err(AuthError::Conflict));
    }
    match primary.insert_user(user).await {
        Ok(saved) => Ok(Ok(saved)),
        Err(StoreError::DuplicateEmail(email)) => {
            tracing::warn!("Email already exists: {}", email);
            Ok(Err(AuthError::Conflict))
        }
        Err(e) => Err(e),
    }
}
