//! Routes Module
//!
//! Router assembly for the backend server.
//!
//! - **`router`** - Main router with tracing, CORS and the 404 fallback
//! - **`api_routes`** - Public and protected API routes

pub mod router;

pub mod api_routes;

pub use router::create_router;
