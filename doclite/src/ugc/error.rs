// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the UGC domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum UgcError {
    #[error("Unique constraint in '{0}' is violated")]
    Duplicate(String),

    #[error("The following keys were not found: {}", format_keys(.0))]
    NotFoundKeys(Vec<Uuid>),

    #[error("Rate {0} is out of range 0..=10")]
    RateOutOfRange(u8),

    #[error("Malformed '{collection}' document: field '{field}'")]
    Malformed { collection: String, field: String },

    #[error("Invalid search term: {0}")]
    Search(#[from] regex::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl UgcError {
    /// Create a malformed-document error
    pub fn malformed(collection: &str, field: &str) -> Self {
        Self::Malformed {
            collection: collection.to_string(),
            field: field.to_string(),
        }
    }

    /// Classify a store failure against a collection: duplicates and
    /// missing documents get their domain meaning, the rest passes through
    pub fn from_store(collection: &str, err: StoreError, ids: &[Uuid]) -> Self {
        if err.is_duplicate() {
            return Self::Duplicate(collection.to_string());
        }
        if matches!(err, StoreError::DocumentNotFound { .. }) {
            return Self::NotFoundKeys(ids.to_vec());
        }
        Self::Store(err)
    }
}

fn format_keys(keys: &[Uuid]) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub type UgcResult<T> = Result<T, UgcError>;
