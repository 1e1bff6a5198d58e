//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── register.rs - Account registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me
//!
//! Register and login answer with the same `AuthResponse` shape whichever
//! store served them. A message ending in "(offline mode)" means the
//! fallback store was used.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use register::register;
