//! Server Module
//!
//! Application state, database loading and app assembly.
//!
//! - **`state`** - `AppState` and its `FromRef` projections
//! - **`config`** - Optional PostgreSQL pool and migrations
//! - **`init`** - `create_app` and `build_state`

pub mod state;

pub mod config;

pub mod init;

pub use init::{build_state, create_app};
pub use state::AppState;
