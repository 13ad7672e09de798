// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ratings writer over the users and movies collections
//!
//! The store does not enforce consistency between a movie's `likes_count`
//! and the users whose `likes` reference it; this writer is the external
//! contract that maintains it. Registering a like adds the movie to the
//! user's `likes` set and increments the movie counter in the same call;
//! unregistering reverses both.

use std::sync::Arc;
use uuid::Uuid;

use crate::query::{Filter, FindOptions};
use crate::store::{Collection, Store, Value};

use super::entities::{Movie, User};
use super::error::{UgcError, UgcResult};

/// Writer keeping user likes and movie like counters consistent
pub struct RatingsService {
    users: Arc<Collection>,
    movies: Arc<Collection>,
}

impl RatingsService {
    /// Bind the service to the users and movies collections
    pub fn new(store: &Store) -> UgcResult<Self> {
        Ok(Self {
            users: store.collection("users")?,
            movies: store.collection("movies")?,
        })
    }

    /// Insert a user. A username colliding under the collation fails with
    /// a duplicate error.
    pub fn add_user(&self, user: &User) -> UgcResult<()> {
        self.users
            .insert(user.to_document())
            .map_err(|e| UgcError::from_store("users", e, &[user.id]))
    }

    /// Insert a movie. A title colliding under the collation fails with a
    /// duplicate error.
    pub fn add_movie(&self, movie: &Movie) -> UgcResult<()> {
        self.movies
            .insert(movie.to_document())
            .map_err(|e| UgcError::from_store("movies", e, &[movie.id]))
    }

    /// Fetch a user by id
    pub fn get_user(&self, id: Uuid) -> UgcResult<User> {
        let doc = self
            .users
            .get(&Value::Uuid(id))
            .ok_or_else(|| UgcError::NotFoundKeys(vec![id]))?;
        User::from_document(&doc)
    }

    /// Fetch a movie by id
    pub fn get_movie(&self, id: Uuid) -> UgcResult<Movie> {
        let doc = self
            .movies
            .get(&Value::Uuid(id))
            .ok_or_else(|| UgcError::NotFoundKeys(vec![id]))?;
        Movie::from_document(&doc)
    }

    /// Look up a movie by title under the title index's collation
    pub fn movie_by_title(&self, title: &str) -> UgcResult<Option<Movie>> {
        match self.movies.find_one(&Filter::eq("title", title)) {
            Some(doc) => Ok(Some(Movie::from_document(&doc)?)),
            None => Ok(None),
        }
    }

    /// Record that a user likes a movie.
    ///
    /// Adds the movie to the user's `likes` set and, when it was not
    /// already present, increments the movie's `likes_count`. Returns
    /// whether anything changed.
    pub fn register_like(&self, user_id: Uuid, movie_id: Uuid) -> UgcResult<bool> {
        if !self.movies.contains(&Value::Uuid(movie_id)) {
            return Err(UgcError::NotFoundKeys(vec![movie_id]));
        }

        let changed = self
            .users
            .add_to_set(&Value::Uuid(user_id), "likes", Value::Uuid(movie_id))
            .map_err(|e| UgcError::from_store("users", e, &[user_id]))?;
        if changed {
            self.movies
                .increment(&Value::Uuid(movie_id), "likes_count", 1)
                .map_err(|e| UgcError::from_store("movies", e, &[movie_id]))?;
        }
        Ok(changed)
    }

    /// Remove a user's like of a movie, decrementing the counter when the
    /// like existed. Returns whether anything changed.
    pub fn unregister_like(&self, user_id: Uuid, movie_id: Uuid) -> UgcResult<bool> {
        let changed = self
            .users
            .remove_from_set(&Value::Uuid(user_id), "likes", Value::Uuid(movie_id))
            .map_err(|e| UgcError::from_store("users", e, &[user_id]))?;
        if changed {
            self.movies
                .increment(&Value::Uuid(movie_id), "likes_count", -1)
                .map_err(|e| UgcError::from_store("movies", e, &[movie_id]))?;
        }
        Ok(changed)
    }

    /// Users whose `likes` reference a movie, served by the likes index
    pub fn users_who_like(&self, movie_id: Uuid) -> UgcResult<Vec<User>> {
        self.users
            .find(&Filter::eq("likes", movie_id), &FindOptions::default())
            .iter()
            .map(User::from_document)
            .collect()
    }

    /// Movies whose like counter falls within [min, max], ascending by
    /// counter, served by the likes-count index
    pub fn movies_with_likes_between(&self, min: i64, max: i64) -> UgcResult<Vec<Movie>> {
        self.movies
            .find(
                &Filter::between("likes_count", min, max),
                &FindOptions::sort_by("likes_count"),
            )
            .iter()
            .map(Movie::from_document)
            .collect()
    }
}
