// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store - the top-level handle over named collections
//!
//! Owns the collection registry and the profiler shared by every
//! collection. All state is in memory; collections are created
//! idempotently and handed out as shared handles.

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::index::IndexSpec;
use crate::profiler::{Profiler, ProfilerStats, ProfilingLevel};
use crate::store::collection::Collection;
use crate::store::types::StoreError;

/// An embedded, in-memory document store
pub struct Store {
    collections: RwLock<HashMap<String, Arc<Collection>>>,
    profiler: Arc<Profiler>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            profiler: Arc::new(Profiler::new()),
        }
    }

    /// Create a collection, returning its handle. Creating an existing
    /// collection returns the existing handle unchanged.
    pub fn create_collection(&self, name: &str) -> Arc<Collection> {
        let mut collections = self.collections.write();
        if let Some(existing) = collections.get(name) {
            debug!("Collection '{}' already exists", name);
            return existing.clone();
        }
        info!("Creating collection '{}'", name);
        let collection = Arc::new(Collection::new(name, self.profiler.clone()));
        collections.insert(name.to_string(), collection.clone());
        collection
    }

    /// Get a handle to an existing collection
    pub fn collection(&self, name: &str) -> Result<Arc<Collection>, StoreError> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }

    /// Check whether a collection exists
    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.read().contains_key(name)
    }

    /// Drop a collection and all its documents and indexes
    pub fn drop_collection(&self, name: &str) -> Result<(), StoreError> {
        self.collections
            .write()
            .remove(name)
            .map(|_| info!("Dropped collection '{}'", name))
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }

    /// All collection names, sorted
    pub fn list_collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Create an index on a collection
    pub fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<bool, StoreError> {
        self.collection(collection)?.create_index(spec)
    }

    /// Set the profiling level and slow-operation threshold, mirroring
    /// `setProfilingLevel(level, {slowms})`
    pub fn set_profiling(&self, level: u8, slow_ms: Option<u64>) -> Result<(), StoreError> {
        let level = ProfilingLevel::from_number(level)
            .ok_or_else(|| StoreError::invalid(format!("invalid profiling level {}", level)))?;
        self.profiler.set_level(level, slow_ms);
        info!(
            "Profiling set to {:?}, slow threshold {:?}ms",
            level, slow_ms
        );
        Ok(())
    }

    /// Snapshot the profiler counters
    pub fn profiler_stats(&self) -> ProfilerStats {
        self.profiler.stats()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("collections", &self.list_collections())
            .finish_non_exhaustive()
    }
}
