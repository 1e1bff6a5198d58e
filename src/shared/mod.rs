//! Shared Module
//!
//! This module contains types that do not depend on the HTTP server:
//! input validation, configuration and the shared error type. They are
//! used by the backend handlers and by the test suite alike.

/// Shared error types
pub mod error;

/// Email and password validation helpers
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, TokenCodecKind};
pub use validation::{check_password_strength, is_valid_email, normalize_email, PasswordStrength};
