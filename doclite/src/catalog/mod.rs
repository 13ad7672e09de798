// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema & index catalog
//!
//! Declares, once at initialization, the collections and indexes a store
//! must have before the service starts, and applies them via bootstrap.

pub mod bootstrap;
pub mod error;
pub mod schema;

pub use bootstrap::{bootstrap, BootstrapReport};
pub use error::{CatalogError, CatalogResult};
pub use schema::{CollectionDecl, ProfilingDecl, SchemaCatalog, SLOW_OP_THRESHOLD_MS};
