// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! UGC domain layer for the movies platform
//!
//! Entities (users, movies, likes, bookmarks, comments), the CRUD and
//! read services over them, the ratings writer maintaining like counters,
//! and the sample fixture dataset.

pub mod entities;
pub mod error;
pub mod fixtures;
pub mod ratings;
pub mod services;

pub use entities::{
    Bookmark, BookmarkPatch, Comment, CommentPatch, Like, LikePatch, Movie, UgcDocument, UgcPatch,
    User, MAX_RATE,
};
pub use error::{UgcError, UgcResult};
pub use fixtures::{load_sample_data, FixtureReport};
pub use ratings::RatingsService;
pub use services::{BookmarkService, CommentService, LikeService, UgcService};
