// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-collection index set
//!
//! Owns every secondary index of one collection and keeps them consistent
//! across document writes. Unique checks run across all indexes before any
//! index is mutated, so a rejected write leaves the set untouched.

use log::debug;

use crate::store::types::DocKey;
use crate::store::value::Document;

use super::secondary::SecondaryIndex;
use super::types::IndexSpec;
use super::IndexError;

/// All secondary indexes of a single collection
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    indexes: Vec<SecondaryIndex>,
}

impl IndexSet {
    /// Create an empty index set
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
        }
    }

    /// Install a built index. Fails if the name is already taken.
    pub fn install(&mut self, index: SecondaryIndex) -> Result<(), IndexError> {
        if self.contains(index.name()) {
            return Err(IndexError::AlreadyExists(index.name().to_string()));
        }
        debug!("Installing index '{}'", index.name());
        self.indexes.push(index);
        Ok(())
    }

    /// Drop an index by name, returning it
    pub fn drop_index(&mut self, name: &str) -> Result<SecondaryIndex, IndexError> {
        let position = self
            .indexes
            .iter()
            .position(|index| index.name() == name)
            .ok_or_else(|| IndexError::NotFound(name.to_string()))?;
        Ok(self.indexes.remove(position))
    }

    /// Look up an index by name
    pub fn get(&self, name: &str) -> Option<&SecondaryIndex> {
        self.indexes.iter().find(|index| index.name() == name)
    }

    /// Check whether an index with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declarations of all installed indexes
    pub fn specs(&self) -> Vec<IndexSpec> {
        self.indexes.iter().map(|index| index.spec().clone()).collect()
    }

    /// Iterate over installed indexes
    pub fn iter(&self) -> impl Iterator<Item = &SecondaryIndex> {
        self.indexes.iter()
    }

    /// Number of installed indexes
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Check if no indexes are installed
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Run unique checks for a prospective insert or update across every
    /// index without mutating anything
    pub fn check_document(&self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        for index in &self.indexes {
            index.check_insert(id, doc)?;
        }
        Ok(())
    }

    /// Add a document to every index. Callers must have passed
    /// `check_document` first.
    pub fn insert_document(&mut self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        for index in &mut self.indexes {
            index.apply_insert(id, doc)?;
        }
        Ok(())
    }

    /// Remove a document from every index
    pub fn remove_document(&mut self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        for index in &mut self.indexes {
            index.apply_remove(id, doc)?;
        }
        Ok(())
    }

    /// Replace a document's entries after an update: unique checks first,
    /// then old keys out, new keys in.
    pub fn replace_document(
        &mut self,
        id: &DocKey,
        old: &Document,
        new: &Document,
    ) -> Result<(), IndexError> {
        self.check_document(id, new)?;
        self.remove_document(id, old)?;
        self.insert_document(id, new)
    }
}
