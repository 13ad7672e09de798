// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Document collection with index maintenance
//!
//! Primary storage is an ordered map keyed by `_id`. Every write runs
//! unique checks across all secondary indexes before mutating anything,
//! so a rejected write leaves both documents and indexes untouched.

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::index::{IndexError, IndexSet, IndexSpec, SecondaryIndex, ID_INDEX};
use crate::profiler::Profiler;
use crate::query::executor;
use crate::query::{Filter, FindOptions, QueryPlan};
use crate::store::types::{DocKey, StoreError};
use crate::store::value::{total_cmp, Document, Value, ID_FIELD};

/// Attempts to install a concurrently-built index before falling back to
/// building under the write lock
const MAX_BUILD_RETRIES: usize = 3;

struct CollectionInner {
    documents: BTreeMap<DocKey, Document>,
    indexes: IndexSet,
    /// Bumped on every document write; index builds use it to detect
    /// interleaved writes
    generation: u64,
}

/// A named collection of documents
pub struct Collection {
    name: String,
    profiler: Arc<Profiler>,
    inner: RwLock<CollectionInner>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: &str, profiler: Arc<Profiler>) -> Self {
        Self {
            name: name.to_string(),
            profiler,
            inner: RwLock::new(CollectionInner {
                documents: BTreeMap::new(),
                indexes: IndexSet::new(),
                generation: 0,
            }),
        }
    }

    /// The collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn time<T>(&self, operation: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.profiler.observe(operation, &self.name, start.elapsed());
        result
    }

    fn doc_key(&self, doc: &Document) -> Result<DocKey, StoreError> {
        let id = doc
            .id()
            .ok_or_else(|| StoreError::invalid(format!("document in '{}' has no _id", self.name)))?;
        if matches!(id, Value::Array(_)) {
            return Err(StoreError::invalid("_id cannot be an array"));
        }
        Ok(DocKey(id.clone()))
    }

    /// Insert a document. Fails with a duplicate-key error on an existing
    /// `_id` or any unique-index collision; a failed insert changes nothing.
    pub fn insert(&self, doc: Document) -> Result<(), StoreError> {
        self.time("insert", || {
            let id = self.doc_key(&doc)?;
            let mut inner = self.inner.write();

            if inner.documents.contains_key(&id) {
                return Err(IndexError::duplicate(ID_INDEX, &id).into());
            }
            inner.indexes.check_document(&id, &doc)?;

            inner.indexes.insert_document(&id, &doc)?;
            inner.documents.insert(id, doc);
            inner.generation += 1;
            Ok(())
        })
    }

    /// Insert documents in order, stopping at the first failure.
    /// Returns how many documents were inserted.
    pub fn insert_many(&self, docs: Vec<Document>) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for doc in docs {
            self.insert(doc)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Get a document by `_id`
    pub fn get(&self, id: &Value) -> Option<Document> {
        self.time("get", || {
            self.inner.read().documents.get(&DocKey(id.clone())).cloned()
        })
    }

    /// Check whether a document with this `_id` exists
    pub fn contains(&self, id: &Value) -> bool {
        self.inner.read().documents.contains_key(&DocKey(id.clone()))
    }

    /// Merge fields into an existing document ($set semantics).
    /// The `_id` field cannot be changed. Returns the updated document.
    pub fn update_set(&self, id: &Value, changes: Document) -> Result<Document, StoreError> {
        if changes.contains(ID_FIELD) {
            return Err(StoreError::invalid("_id cannot be updated"));
        }
        self.time("update", || {
            let key = DocKey(id.clone());
            let mut inner = self.inner.write();

            let old = inner
                .documents
                .get(&key)
                .cloned()
                .ok_or_else(|| StoreError::not_found(&self.name, id))?;
            let mut new = old.clone();
            new.merge(changes);

            inner.indexes.replace_document(&key, &old, &new)?;
            inner.documents.insert(key, new.clone());
            inner.generation += 1;
            Ok(new)
        })
    }

    /// Add `delta` to an integer field ($inc semantics), treating a missing
    /// field as zero. Returns the new value.
    pub fn increment(&self, id: &Value, field: &str, delta: i64) -> Result<i64, StoreError> {
        self.time("update", || {
            let key = DocKey(id.clone());
            let mut inner = self.inner.write();

            let old = inner
                .documents
                .get(&key)
                .cloned()
                .ok_or_else(|| StoreError::not_found(&self.name, id))?;
            let current = match old.get(field) {
                None | Some(Value::Null) => 0,
                Some(Value::Integer(n)) => *n,
                Some(other) => {
                    return Err(StoreError::invalid(format!(
                        "cannot increment {} field '{}'",
                        other.type_name(),
                        field
                    )))
                }
            };
            let updated = current + delta;

            let mut new = old.clone();
            new.set(field, updated);
            inner.indexes.replace_document(&key, &old, &new)?;
            inner.documents.insert(key, new);
            inner.generation += 1;
            Ok(updated)
        })
    }

    /// Append a value to an array field unless already present
    /// ($addToSet semantics), treating a missing field as an empty array.
    /// Returns whether the document changed.
    pub fn add_to_set(&self, id: &Value, field: &str, value: Value) -> Result<bool, StoreError> {
        self.mutate_set(id, field, |items| {
            let present = items
                .iter()
                .any(|item| total_cmp(item, &value) == std::cmp::Ordering::Equal);
            if !present {
                items.push(value.clone());
            }
            !present
        })
    }

    /// Remove a value from an array field ($pull semantics).
    /// Returns whether the document changed.
    pub fn remove_from_set(&self, id: &Value, field: &str, value: Value) -> Result<bool, StoreError> {
        self.mutate_set(id, field, |items| {
            let before = items.len();
            items.retain(|item| total_cmp(item, &value) != std::cmp::Ordering::Equal);
            items.len() != before
        })
    }

    fn mutate_set(
        &self,
        id: &Value,
        field: &str,
        mutate: impl FnOnce(&mut Vec<Value>) -> bool,
    ) -> Result<bool, StoreError> {
        self.time("update", || {
            let key = DocKey(id.clone());
            let mut inner = self.inner.write();

            let old = inner
                .documents
                .get(&key)
                .cloned()
                .ok_or_else(|| StoreError::not_found(&self.name, id))?;
            let mut items = match old.get(field) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items.clone(),
                Some(other) => {
                    return Err(StoreError::invalid(format!(
                        "field '{}' is {}, not an array",
                        field,
                        other.type_name()
                    )))
                }
            };

            if !mutate(&mut items) {
                return Ok(false);
            }

            let mut new = old.clone();
            new.set(field, Value::Array(items));
            inner.indexes.replace_document(&key, &old, &new)?;
            inner.documents.insert(key, new);
            inner.generation += 1;
            Ok(true)
        })
    }

    /// Delete a document by `_id`, returning it
    pub fn delete(&self, id: &Value) -> Result<Document, StoreError> {
        self.time("delete", || {
            let key = DocKey(id.clone());
            let mut inner = self.inner.write();

            let doc = inner
                .documents
                .remove(&key)
                .ok_or_else(|| StoreError::not_found(&self.name, id))?;
            inner.indexes.remove_document(&key, &doc)?;
            inner.generation += 1;
            Ok(doc)
        })
    }

    /// All documents in `_id` order
    pub fn scan(&self) -> Vec<Document> {
        self.time("scan", || self.inner.read().documents.values().cloned().collect())
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Check if the collection holds no documents
    pub fn is_empty(&self) -> bool {
        self.inner.read().documents.is_empty()
    }

    /// Find documents matching a filter
    pub fn find(&self, filter: &Filter, options: &FindOptions) -> Vec<Document> {
        self.time("find", || {
            let inner = self.inner.read();
            executor::find(&inner.documents, &inner.indexes, filter, options)
        })
    }

    /// Find and return at most one matching document
    pub fn find_one(&self, filter: &Filter) -> Option<Document> {
        self.find(filter, &FindOptions::default().with_limit(1))
            .into_iter()
            .next()
    }

    /// Explain how a find over this filter would access the collection
    pub fn explain(&self, filter: &Filter) -> QueryPlan {
        let inner = self.inner.read();
        executor::explain(&inner.indexes, filter)
    }

    /// Create a secondary index.
    ///
    /// The build scans a snapshot without holding the write lock, so
    /// concurrent reads proceed; only the final installation excludes
    /// writers. Re-declaring an identical index is a no-op returning false;
    /// a different declaration under the same name is an error. A build
    /// over data violating a new uniqueness constraint fails and installs
    /// nothing.
    pub fn create_index(&self, spec: IndexSpec) -> Result<bool, StoreError> {
        if spec.keys.is_empty() {
            return Err(IndexError::config("index must declare at least one key").into());
        }

        for _ in 0..MAX_BUILD_RETRIES {
            let (snapshot, generation) = {
                let inner = self.inner.read();
                if let Some(existing) = inner.indexes.get(&spec.name) {
                    if *existing.spec() == spec {
                        return Ok(false);
                    }
                    return Err(IndexError::SpecConflict(spec.name.clone()).into());
                }
                (inner.documents.clone(), inner.generation)
            };

            let built = SecondaryIndex::build(spec.clone(), snapshot.iter())?;

            let mut inner = self.inner.write();
            if inner.generation == generation {
                inner.indexes.install(built)?;
                info!("Created index '{}' on '{}'", spec.name, self.name);
                return Ok(true);
            }
            debug!(
                "Index build for '{}' on '{}' raced a write, retrying",
                spec.name, self.name
            );
        }

        // Writes kept interleaving; build the index under the write lock
        let mut inner = self.inner.write();
        if let Some(existing) = inner.indexes.get(&spec.name) {
            if *existing.spec() == spec {
                return Ok(false);
            }
            return Err(IndexError::SpecConflict(spec.name.clone()).into());
        }
        let built = SecondaryIndex::build(spec.clone(), inner.documents.iter())?;
        inner.indexes.install(built)?;
        info!("Created index '{}' on '{}'", spec.name, self.name);
        Ok(true)
    }

    /// Drop a secondary index
    pub fn drop_index(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner.indexes.drop_index(name)?;
        info!("Dropped index '{}' on '{}'", name, self.name);
        Ok(())
    }

    /// Declarations of all installed secondary indexes
    pub fn index_specs(&self) -> Vec<IndexSpec> {
        self.inner.read().indexes.specs()
    }

    /// Check whether a secondary index exists
    pub fn has_index(&self, name: &str) -> bool {
        self.inner.read().indexes.contains(name)
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("documents", &inner.documents.len())
            .field("indexes", &inner.indexes.len())
            .finish()
    }
}
