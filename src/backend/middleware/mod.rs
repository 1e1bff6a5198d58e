//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token middleware for protecting routes, and the
//!   `AuthUser` extractor handlers use to read the caller's claims
//! - **`json`** - `JsonBody`, a JSON body extractor that rejects with the
//!   backend's error shape
//!
//! # Example
//!
//! ```rust,no_run
//! use student_portal::backend::middleware::auth_middleware;
//!
//! // let protected = Router::new()
//! //     .route("/api/grades", get(list_grades))
//! //     .route_layer(middleware::from_fn_with_state(auth_service, auth_middleware));
//! ```

pub mod auth;
pub mod json;

pub use auth::{auth_middleware, AuthUser};
pub use json::JsonBody;
