// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shared storage types and errors

use crate::index::IndexError;
use crate::store::value::{total_cmp, Value};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Primary-key wrapper ordering documents by their `_id` value
#[derive(Debug, Clone)]
pub struct DocKey(pub Value);

impl DocKey {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl PartialEq for DocKey {
    fn eq(&self, other: &Self) -> bool {
        total_cmp(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for DocKey {}

impl PartialOrd for DocKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocKey {
    fn cmp(&self, other: &Self) -> Ordering {
        total_cmp(&self.0, &other.0)
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Value> for DocKey {
    fn from(value: Value) -> Self {
        DocKey(value)
    }
}

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("Document {id} not found in '{collection}'")]
    DocumentNotFound { collection: String, id: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

impl StoreError {
    /// Create a document-not-found error
    pub fn not_found<I: fmt::Display>(collection: &str, id: I) -> Self {
        Self::DocumentNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an invalid-document error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Whether this error reports a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Index(e) if e.is_duplicate())
    }
}
