//! Student portal backend
//!
//! - **`shared`** - validation helpers, configuration and shared errors
//! - **`backend`** - the HTTP server, authentication and portal resources

pub mod shared;

pub mod backend;
