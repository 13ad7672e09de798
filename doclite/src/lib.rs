// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! DocLite - A lightweight embedded document store
//!
//! DocLite is an in-memory document store built for the movies/UGC
//! platform: collections of schemaless documents with declared secondary
//! indexes, uniqueness constraints under locale-aware collation, and
//! slow-operation diagnostics.
//!
//! # Features
//!
//! - **Schema & Index Catalog**: collections and indexes declared once at
//!   initialization and applied idempotently
//! - **Collated Uniqueness**: unique indexes under en/strength-2 collation
//!   (case- and accent-insensitive)
//! - **Index-Served Queries**: equality/range filters planned against the
//!   declared indexes, with plan explanation
//! - **Slow-Operation Profiling**: operations above a latency threshold
//!   logged for operability
//! - **UGC Domain Layer**: users, movies, likes, bookmarks and comments
//!   with their CRUD services and fixtures
//!
//! # Usage
//!
//! ```rust,ignore
//! use doclite::{bootstrap, SchemaCatalog, Store};
//!
//! let store = Store::new();
//! bootstrap(&store, &SchemaCatalog::movies_platform())?;
//!
//! let movies = store.collection("movies")?;
//! movies.insert(Document::new().with("_id", id).with("title", "Matrix").with("likes_count", 0))?;
//! ```

pub mod catalog;
pub mod index;
pub mod profiler;
pub mod query;
pub mod store;
pub mod ugc;

// Re-export the primary API surface
pub use catalog::{bootstrap, BootstrapReport, CatalogError, SchemaCatalog};
pub use index::{IndexError, IndexSpec};
pub use profiler::{ProfilerStats, ProfilingLevel};
pub use query::{Filter, FindOptions, QueryPlan, SortOrder};
pub use store::{Collation, Collection, Document, Store, StoreError, Strength, Value};

/// DocLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DocLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
