// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Declarative schema: collections, their indexes, and profiling settings
//!
//! A `SchemaCatalog` is pure data. Nothing happens until it is applied by
//! the bootstrap step, which makes re-declaration idempotent and keeps the
//! full contract reviewable in one place.

use serde::{Deserialize, Serialize};

use crate::index::IndexSpec;
use crate::store::Collation;

/// The movies-platform slow-operation threshold
pub const SLOW_OP_THRESHOLD_MS: u64 = 50;

/// A collection and the indexes it must carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDecl {
    pub name: String,
    pub indexes: Vec<IndexSpec>,
}

/// Profiling configuration applied at bootstrap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfilingDecl {
    /// Numeric profiling level (1 = slow operations only)
    pub level: u8,
    /// Slow-operation threshold in milliseconds
    pub slow_ms: u64,
}

/// Declarative description of everything a store must have before the
/// service starts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaCatalog {
    pub collections: Vec<CollectionDecl>,
    pub profiling: Option<ProfilingDecl>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the catalog to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load a catalog from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a collection declaration
    pub fn collection(mut self, name: &str, indexes: Vec<IndexSpec>) -> Self {
        self.collections.push(CollectionDecl {
            name: name.to_string(),
            indexes,
        });
        self
    }

    /// Set the profiling configuration
    pub fn profiling(mut self, level: u8, slow_ms: u64) -> Self {
        self.profiling = Some(ProfilingDecl { level, slow_ms });
        self
    }

    /// The movies/UGC platform schema.
    ///
    /// `users` and `movies` carry the catalog collections with their
    /// uniqueness constraints under the en/strength-2 collation; `likes`,
    /// `bookmarks` and `comments` carry the UGC collections with one
    /// like/bookmark per (user, content) pair.
    pub fn movies_platform() -> Self {
        Self::new()
            .collection(
                "users",
                vec![
                    IndexSpec::on("users_username_idx", "username")
                        .unique()
                        .with_collation(Collation::en_secondary()),
                    IndexSpec::on("users_likes_idx", "likes"),
                ],
            )
            .collection(
                "movies",
                vec![
                    IndexSpec::on("movies_title_idx", "title")
                        .unique()
                        .with_collation(Collation::en_secondary()),
                    IndexSpec::on("movies_likes_idx", "likes_count"),
                    IndexSpec::compound("movies_id_likes", &["_id", "likes_count"]),
                ],
            )
            .collection(
                "likes",
                vec![IndexSpec::compound(
                    "likes_user_content_idx",
                    &["user_id", "content_id"],
                )
                .unique()],
            )
            .collection(
                "bookmarks",
                vec![IndexSpec::compound(
                    "bookmarks_user_content_idx",
                    &["user_id", "content_id"],
                )
                .unique()],
            )
            .collection(
                "comments",
                vec![IndexSpec::on("comments_created_idx", "created_at")],
            )
            .profiling(1, SLOW_OP_THRESHOLD_MS)
    }
}
