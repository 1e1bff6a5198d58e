//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion to responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Every error renders as `{ "success": false, "message": ..., "status": ... }`
//! with the matching HTTP status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
