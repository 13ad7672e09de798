// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sample dataset for the movies/UGC platform
//!
//! Insert-only fixture load, run once after bootstrap. Loading into a
//! store that already holds any of these documents fails with a duplicate
//! error instead of silently skipping.

use chrono::{DateTime, TimeZone, Utc};
use uuid::{uuid, Uuid};

use crate::store::Store;

use super::entities::{Bookmark, Comment, Like, Movie, User};
use super::error::UgcResult;
use super::ratings::RatingsService;
use super::services::{BookmarkService, CommentService, LikeService};

/// How many documents a fixture load inserted per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureReport {
    pub users: usize,
    pub movies: usize,
    pub likes: usize,
    pub bookmarks: usize,
    pub comments: usize,
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("fixture timestamps are valid")
}

fn sample_users() -> Vec<User> {
    vec![
        User {
            id: uuid!("476bff82-92d5-4c21-99ef-67cbbdd5fd5e"),
            username: "amelie".to_string(),
            likes: Vec::new(),
        },
        User {
            id: uuid!("550e8400-e29b-41d4-a716-446655440000"),
            username: "Bob".to_string(),
            likes: Vec::new(),
        },
        User {
            id: uuid!("f47ac10b-58cc-4372-a567-0e02b2c3d479"),
            username: "charlie".to_string(),
            likes: Vec::new(),
        },
    ]
}

fn sample_movies() -> Vec<Movie> {
    vec![
        Movie {
            id: uuid!("2a7d84a6-befe-437d-8813-e6d5bb06a34f"),
            title: "Matrix".to_string(),
            likes_count: 0,
        },
        Movie {
            id: uuid!("a7f12e4b-5c8d-40e9-821e-9d2b3478f1a5"),
            title: "Matrix 2".to_string(),
            likes_count: 0,
        },
        Movie {
            id: uuid!("c9d4c530-7657-4ca3-bc8d-0b888e65000b"),
            title: "Inception".to_string(),
            likes_count: 0,
        },
    ]
}

fn sample_likes() -> Vec<Like> {
    vec![
        Like {
            id: uuid!("3f8a5e78-2c5b-4b3d-9f9e-882a74e0c4e1"),
            user_id: uuid!("476bff82-92d5-4c21-99ef-67cbbdd5fd5e"),
            content_id: uuid!("2a7d84a6-befe-437d-8813-e6d5bb06a34f"),
            created_at: ts(2021, 1, 1, 10, 0),
            rate: 5,
        },
        Like {
            id: uuid!("84e2b9c1-3d47-4a6c-b1f3-75e9d4a6f9c2"),
            user_id: uuid!("476bff82-92d5-4c21-99ef-67cbbdd5fd5e"),
            content_id: uuid!("a7f12e4b-5c8d-40e9-821e-9d2b3478f1a5"),
            created_at: ts(2021, 1, 2, 10, 0),
            rate: 10,
        },
        Like {
            id: uuid!("e7d294b1-5a3f-41c8-92f8-37f3b6d48c8e"),
            user_id: uuid!("550e8400-e29b-41d4-a716-446655440000"),
            content_id: uuid!("c9d4c530-7657-4ca3-bc8d-0b888e65000b"),
            created_at: ts(2021, 1, 1, 11, 0),
            rate: 10,
        },
        Like {
            id: uuid!("2ad262f4-442a-490e-bb1a-6d3b94d132ef"),
            user_id: uuid!("476bff82-92d5-4c21-99ef-67cbbdd5fd5e"),
            content_id: uuid!("c9d4c530-7657-4ca3-bc8d-0b888e65000b"),
            created_at: ts(2021, 1, 1, 11, 0),
            rate: 5,
        },
    ]
}

fn sample_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark {
            id: uuid!("f9a63c7e-d0bf-47b2-b821-3d2a74185a2d"),
            user_id: uuid!("f47ac10b-58cc-4372-a567-0e02b2c3d479"),
            content_id: uuid!("6fa459ea-ee8a-3ca4-894e-db77e160355e"),
            created_at: ts(2021, 1, 1, 10, 0),
        },
        Bookmark {
            id: uuid!("6bfa7d2a-e1c0-47b9-91d5-23a6075fbac2"),
            user_id: uuid!("9f8d08af-72cd-4c85-8d29-7b28f4d3f48d"),
            content_id: uuid!("8148f77d-a44b-48d3-9df5-0f8b1a53fd2b"),
            created_at: ts(2021, 1, 1, 11, 0),
        },
        Bookmark {
            id: uuid!("d3a17b85-6f2d-4b7f-9e23-1c4f78e2a5d6"),
            user_id: uuid!("f85c4a92-1b3d-45c7-8d7e-62a174b9e3f2"),
            content_id: uuid!("8148f77d-a44b-48d3-9df5-0f8b1a53fd2b"),
            created_at: ts(2021, 1, 2, 12, 0),
        },
    ]
}

fn sample_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: uuid!("12d4c8f9-82a1-4d61-b964-5298d9f321b3"),
            user_id: uuid!("7f5198c6-1545-4b3e-b865-4a652f87e5dd"),
            content_id: uuid!("2ad262f4-442a-490e-bb1a-6d3b94d132ef"),
            created_at: ts(2025, 5, 8, 19, 10),
            text: "your state proud of words".to_string(),
        },
        Comment {
            id: uuid!("bfc3a687-8f4d-46b5-b3e9-81c2b760bf2d"),
            user_id: uuid!("48d6e3e1-d19a-4aad-af8a-2c5a95831397"),
            content_id: uuid!("1b459e76-fc8d-4eb6-b5cc-23e73c732af7"),
            created_at: ts(2025, 5, 9, 10, 55),
            text: "some random words put into sentence".to_string(),
        },
    ]
}

/// The users registered as liking each sample movie, used to seed
/// consistent `likes` references and `likes_count` counters
fn sample_registrations() -> Vec<(Uuid, Uuid)> {
    sample_likes()
        .iter()
        .map(|like| (like.user_id, like.content_id))
        .collect()
}

/// Load the sample dataset into a bootstrapped store
pub fn load_sample_data(store: &Store) -> UgcResult<FixtureReport> {
    let ratings = RatingsService::new(store)?;

    let users = sample_users();
    for user in &users {
        ratings.add_user(user)?;
    }
    let movies = sample_movies();
    for movie in &movies {
        ratings.add_movie(movie)?;
    }

    let like_service = LikeService::new(store)?;
    let likes = like_service.insert(sample_likes())?;

    let bookmark_service = BookmarkService::new(store)?;
    let bookmarks = bookmark_service.insert(sample_bookmarks())?;

    let comment_service = CommentService::new(store)?;
    let comments = comment_service.insert(sample_comments())?;

    // Mirror the like documents into the catalog collections so
    // likes_count matches the users' likes references
    for (user_id, movie_id) in sample_registrations() {
        ratings.register_like(user_id, movie_id)?;
    }

    Ok(FixtureReport {
        users: users.len(),
        movies: movies.len(),
        likes: likes.len(),
        bookmarks: bookmarks.len(),
        comments: comments.len(),
    })
}
