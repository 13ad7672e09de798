// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CRUD and read services over the UGC collections
//!
//! One generic service covers likes, bookmarks and comments; the
//! entity-specific reads (average rate, text search) are inherent impls on
//! the concrete instantiations. Duplicate keys surface as domain errors,
//! never silently dropped or retried.

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::query::{Filter, FindOptions};
use crate::store::{Collection, Store, Value};

use super::entities::{Comment, Like, UgcDocument, UgcPatch};
use super::error::{UgcError, UgcResult};

/// Generic create/read/update/delete service over one UGC collection
pub struct UgcService<T: UgcDocument> {
    collection: Arc<Collection>,
    _marker: PhantomData<T>,
}

impl<T: UgcDocument> UgcService<T> {
    /// Bind the service to its collection in the store
    pub fn new(store: &Store) -> UgcResult<Self> {
        Ok(Self {
            collection: store.collection(T::COLLECTION)?,
            _marker: PhantomData,
        })
    }

    /// Insert entities in order, stopping at the first failure.
    /// Returns the inserted ids.
    pub fn insert(&self, entities: Vec<T>) -> UgcResult<Vec<Uuid>> {
        let mut inserted = Vec::with_capacity(entities.len());
        for entity in entities {
            let id = entity.id();
            self.collection
                .insert(entity.to_document())
                .map_err(|e| UgcError::from_store(T::COLLECTION, e, &[id]))?;
            inserted.push(id);
        }
        Ok(inserted)
    }

    /// Fetch one entity by id
    pub fn get(&self, id: Uuid) -> UgcResult<T> {
        let doc = self
            .collection
            .get(&Value::Uuid(id))
            .ok_or_else(|| UgcError::NotFoundKeys(vec![id]))?;
        T::from_document(&doc)
    }

    /// Apply a partial update and return the updated entity
    pub fn update(&self, patch: T::Patch) -> UgcResult<T> {
        let id = patch.id();
        let changes = patch.changes();
        if changes.is_empty() {
            return self.get(id);
        }
        let updated = self
            .collection
            .update_set(&Value::Uuid(id), changes)
            .map_err(|e| UgcError::from_store(T::COLLECTION, e, &[id]))?;
        T::from_document(&updated)
    }

    /// Delete entities by id. All ids must exist: unknown ids fail the
    /// whole call with the missing keys before anything is deleted.
    pub fn delete(&self, ids: Vec<Uuid>) -> UgcResult<Vec<Uuid>> {
        let missing: Vec<Uuid> = ids
            .iter()
            .filter(|id| !self.collection.contains(&Value::Uuid(**id)))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(UgcError::NotFoundKeys(missing));
        }

        for id in &ids {
            self.collection
                .delete(&Value::Uuid(*id))
                .map_err(|e| UgcError::from_store(T::COLLECTION, e, &[*id]))?;
        }
        Ok(ids)
    }

    /// All entities referencing a user
    pub fn get_by_user(&self, user_id: Uuid) -> UgcResult<Vec<T>> {
        self.find_mapped(Filter::eq("user_id", user_id))
    }

    /// All entities referencing a content item
    pub fn get_by_content(&self, content_id: Uuid) -> UgcResult<Vec<T>> {
        self.find_mapped(Filter::eq("content_id", content_id))
    }

    /// All entities created within [start, end]
    pub fn get_by_timerange(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> UgcResult<Vec<T>> {
        self.find_mapped(Filter::between("created_at", start, end))
    }

    /// Number of stored entities
    pub fn count(&self) -> usize {
        self.collection.len()
    }

    fn find_mapped(&self, filter: Filter) -> UgcResult<Vec<T>> {
        self.collection
            .find(&filter, &FindOptions::default())
            .iter()
            .map(T::from_document)
            .collect()
    }
}

/// Like service with rating aggregation
pub type LikeService = UgcService<Like>;

impl UgcService<Like> {
    /// Average rate over all likes of a content item; None when unrated
    pub fn average_rate(&self, content_id: Uuid) -> UgcResult<Option<f64>> {
        let likes = self.get_by_content(content_id)?;
        if likes.is_empty() {
            return Ok(None);
        }
        let sum: i64 = likes.iter().map(|like| like.rate as i64).sum();
        Ok(Some(sum as f64 / likes.len() as f64))
    }
}

/// Bookmark service
pub type BookmarkService = UgcService<super::entities::Bookmark>;

/// Comment service with text search
pub type CommentService = UgcService<Comment>;

impl UgcService<Comment> {
    /// Case-insensitive substring search over comment text
    pub fn search_text(&self, term: &str) -> UgcResult<Vec<Comment>> {
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        let mut matches = Vec::new();
        for doc in self.collection.scan() {
            let comment = Comment::from_document(&doc)?;
            if pattern.is_match(&comment.text) {
                matches.push(comment);
            }
        }
        Ok(matches)
    }
}
