// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ordered secondary index over a collection
//!
//! Entries map encoded key tuples to the set of document ids holding that
//! key. Unique indexes reject a key already mapped to a different document.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::ops::Bound;

use crate::store::types::DocKey;
use crate::store::value::Document;

use super::types::{encode_document, IndexKey, IndexSpec};
use super::IndexError;

/// A single secondary index: ordered key tuples with document-id postings
#[derive(Debug, Clone)]
pub struct SecondaryIndex {
    spec: IndexSpec,
    entries: BTreeMap<IndexKey, BTreeSet<DocKey>>,
}

impl SecondaryIndex {
    /// Create an empty index from its declaration
    pub fn new(spec: IndexSpec) -> Self {
        Self {
            spec,
            entries: BTreeMap::new(),
        }
    }

    /// Build an index over a snapshot of existing documents.
    ///
    /// Fails with a duplicate-key error if the snapshot already violates a
    /// uniqueness constraint being introduced; the partial index is dropped.
    pub fn build<'a, I>(spec: IndexSpec, docs: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = (&'a DocKey, &'a Document)>,
    {
        let mut index = Self::new(spec);
        for (id, doc) in docs {
            index.check_insert(id, doc)?;
            index.apply_insert(id, doc)?;
        }
        Ok(index)
    }

    /// The index declaration
    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// The index name
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Verify that inserting `doc` would not violate a uniqueness
    /// constraint. Postings already naming `id` do not count as conflicts,
    /// which makes the check correct for updates as well.
    pub fn check_insert(&self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        if !self.spec.unique {
            return Ok(());
        }
        for key in encode_document(doc, &self.spec)? {
            if let Some(ids) = self.entries.get(&key) {
                if ids.iter().any(|existing| existing != id) {
                    return Err(IndexError::duplicate(&self.spec.name, &key));
                }
            }
        }
        Ok(())
    }

    /// Add a document's keys. Callers run `check_insert` across all of a
    /// collection's indexes first so a failed unique check mutates nothing.
    pub fn apply_insert(&mut self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        for key in encode_document(doc, &self.spec)? {
            self.entries.entry(key).or_default().insert(id.clone());
        }
        Ok(())
    }

    /// Remove a document's keys
    pub fn apply_remove(&mut self, id: &DocKey, doc: &Document) -> Result<(), IndexError> {
        for key in encode_document(doc, &self.spec)? {
            if let Some(ids) = self.entries.get_mut(&key) {
                ids.remove(id);
                if ids.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }
        Ok(())
    }

    /// Scan (key, document id) pairs in key order starting at `lower`.
    ///
    /// Callers stop the scan once keys leave their prefix; a multikey
    /// document appears once per matching key it holds.
    pub fn scan_from(&self, lower: Bound<IndexKey>) -> impl Iterator<Item = (&IndexKey, &DocKey)> {
        self.entries
            .range((lower, Bound::Unbounded))
            .flat_map(|(key, ids)| ids.iter().map(move |id| (key, id)))
    }
}
