//! Store selection integration tests
//!
//! How requests are routed between the primary and the fallback store.
