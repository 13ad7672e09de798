// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the schema catalog

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Bootstrap of collection '{collection}' failed: {source}")]
    Bootstrap {
        collection: String,
        #[source]
        source: StoreError,
    },

    #[error("Fixture load into '{collection}' failed: {source}")]
    FixtureLoad {
        collection: String,
        #[source]
        source: StoreError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Whether the underlying failure is a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        match self {
            CatalogError::Bootstrap { source, .. } => source.is_duplicate(),
            CatalogError::FixtureLoad { source, .. } => source.is_duplicate(),
            CatalogError::Store(source) => source.is_duplicate(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
