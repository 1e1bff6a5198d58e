//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A scriptable in-memory `UserStore`
//! - App construction and request helpers
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;

pub use auth_helpers::*;
pub use mock_store::*;
