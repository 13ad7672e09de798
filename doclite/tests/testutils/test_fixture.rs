//! Test fixture for DocLite integration tests
//!
//! Provides isolated store instances using only the public API.

use std::sync::Arc;

use doclite::catalog::{bootstrap, SchemaCatalog};
use doclite::store::{Collection, Store};
use doclite::ugc::{load_sample_data, FixtureReport};

/// Test fixture with an isolated store instance
pub struct TestFixture {
    store: Store,
}

impl TestFixture {
    /// Create a fixture with an empty, un-bootstrapped store
    pub fn empty() -> Self {
        Self {
            store: Store::new(),
        }
    }

    /// Create a fixture bootstrapped with the movies-platform catalog
    pub fn new() -> Self {
        let fixture = Self::empty();
        bootstrap(&fixture.store, &SchemaCatalog::movies_platform())
            .expect("bootstrap should succeed on an empty store");
        fixture
    }

    /// Create a bootstrapped fixture with the sample dataset loaded
    pub fn with_sample_data() -> (Self, FixtureReport) {
        let fixture = Self::new();
        let report =
            load_sample_data(fixture.store()).expect("fixture load should succeed once");
        (fixture, report)
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Handle to a collection that must exist
    pub fn collection(&self, name: &str) -> Arc<Collection> {
        self.store
            .collection(name)
            .unwrap_or_else(|_| panic!("collection '{}' should exist", name))
    }
}
