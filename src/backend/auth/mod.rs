//! Authentication Module
//!
//! This module handles registration, login and request authentication, with
//! transparent degradation to an in-memory store when the primary store is
//! unavailable.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── claims.rs    - Roles and the identity claim set
//! ├── tokens.rs    - Signed and unsigned token codecs
//! ├── passwords.rs - bcrypt password hasher
//! ├── users.rs     - Stored user record and PostgreSQL store
//! ├── store.rs     - UserStore trait and availability probe
//! ├── fallback.rs  - In-memory fallback store
//! ├── gate.rs      - Bearer authentication gate and role check
//! ├── errors.rs    - AuthError taxonomy
//! ├── service.rs   - Login and registration orchestration
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: validate → hash → primary store (or fallback) → token
//! 2. **Login**: validate → look up → verify password → token
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` → decode →
//!    optional role check

pub mod claims;

pub mod tokens;

pub mod passwords;

pub mod users;

pub mod store;

pub mod fallback;

pub mod gate;

pub mod errors;

pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use claims::{ClaimSet, Role};
pub use errors::AuthError;
pub use fallback::FallbackStore;
pub use gate::{authenticate, require_role, AuthResult};
pub use handlers::{get_me, login, register};
pub use passwords::PasswordHasher;
pub use service::{AuthOutcome, AuthService, Credentials, Registration, ServedBy};
pub use store::{StoreError, UserStore};
pub use tokens::{TokenCodec, TokenError};
pub use users::{PgUserStore, StoredUser};
