//! Backend Module
//!
//! All server-side code for the student portal: an Axum HTTP server with
//! authentication, an in-memory fallback user store and the portal's
//! resource endpoints backed by PostgreSQL.
//!
//! # Architecture
//!
//! - **`server`** - Application state, database loading, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Tokens, passwords, user stores, login and registration
//! - **`middleware`** - Bearer-token middleware and the `AuthUser` extractor
//! - **`portal`** - Courses, assignments, materials and grades
//! - **`error`** - `BackendError` and its JSON response form

pub mod server;

pub mod routes;

pub mod error;

pub mod auth;

pub mod middleware;

pub mod portal;

pub use error::BackendError;
pub use server::create_app;
