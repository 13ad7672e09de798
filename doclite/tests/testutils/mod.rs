//! Test utilities for DocLite integration tests
//!
//! TestFixture builds an isolated in-memory store, optionally
//! bootstrapped with the movies-platform catalog and sample data.

pub mod test_fixture;
