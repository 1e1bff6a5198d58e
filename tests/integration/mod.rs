//! Integration tests
//!
//! Drive the full router with `tower::ServiceExt::oneshot`.

pub mod api;
pub mod config_test;
pub mod store;
