// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the indexing system

use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index '{0}' already exists")]
    AlreadyExists(String),

    #[error("Index '{0}' already exists with a different definition")]
    SpecConflict(String),

    #[error("Index '{0}' not found")]
    NotFound(String),

    #[error("Duplicate key violates unique index '{index}': {key}")]
    DuplicateKey { index: String, key: String },

    #[error("Invalid index key: {0}")]
    InvalidKey(String),

    #[error("Invalid index configuration: {0}")]
    InvalidConfiguration(String),
}

impl IndexError {
    /// Create a duplicate-key error
    pub fn duplicate<K: std::fmt::Display>(index: &str, key: K) -> Self {
        Self::DuplicateKey {
            index: index.to_string(),
            key: key.to_string(),
        }
    }

    /// Create an invalid-key error
    pub fn invalid_key<S: Into<String>>(msg: S) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Whether this error reports a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}
