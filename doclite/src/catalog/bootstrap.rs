// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Apply a schema catalog to a store
//!
//! Bootstrap runs once at initialization: it creates the declared
//! collections and indexes and configures profiling. Re-running against an
//! already-bootstrapped store is a no-op. Index creation failures — above
//! all a uniqueness constraint violated by existing data — are surfaced to
//! the caller, never swallowed.

use log::info;

use crate::store::Store;

use super::error::{CatalogError, CatalogResult};
use super::schema::SchemaCatalog;

/// What a bootstrap run did
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    /// Collections created by this run
    pub collections_created: Vec<String>,
    /// Indexes created by this run
    pub indexes_created: Vec<String>,
    /// Indexes that already existed with an identical declaration
    pub indexes_existing: Vec<String>,
}

/// Create the declared collections and indexes and apply the profiling
/// configuration
pub fn bootstrap(store: &Store, catalog: &SchemaCatalog) -> CatalogResult<BootstrapReport> {
    let mut report = BootstrapReport::default();

    for decl in &catalog.collections {
        if !store.has_collection(&decl.name) {
            report.collections_created.push(decl.name.clone());
        }
        let collection = store.create_collection(&decl.name);

        for spec in &decl.indexes {
            let created =
                collection
                    .create_index(spec.clone())
                    .map_err(|source| CatalogError::Bootstrap {
                        collection: decl.name.clone(),
                        source,
                    })?;
            if created {
                report.indexes_created.push(spec.name.clone());
            } else {
                report.indexes_existing.push(spec.name.clone());
            }
        }
    }

    if let Some(profiling) = &catalog.profiling {
        store.set_profiling(profiling.level, Some(profiling.slow_ms))?;
    }

    info!(
        "Bootstrap complete: {} collections created, {} indexes created, {} already present",
        report.collections_created.len(),
        report.indexes_created.len(),
        report.indexes_existing.len()
    );
    Ok(report)
}
