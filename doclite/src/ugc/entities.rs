// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! UGC and catalog entities and their document mappings
//!
//! Likes, bookmarks and comments are the user-generated content; users and
//! movies are the catalog collections they reference. Referential
//! integrity between them is a writer-side contract, not a storage
//! guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Document, Value};

use super::error::UgcError;

/// Upper bound of the like rate scale
pub const MAX_RATE: u8 = 10;

/// A document type the generic UGC services can store
pub trait UgcDocument: Sized {
    /// Collection the documents live in
    const COLLECTION: &'static str;

    /// Partial-update patch type for this document
    type Patch: UgcPatch;

    fn id(&self) -> Uuid;
    fn to_document(&self) -> Document;
    fn from_document(doc: &Document) -> Result<Self, UgcError>;
}

/// A partial update: target id plus the fields to overwrite
pub trait UgcPatch {
    fn id(&self) -> Uuid;
    /// The changed fields as a $set document
    fn changes(&self) -> Document;
}

/// A platform user: unique username, set of liked content references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub likes: Vec<Uuid>,
}

impl User {
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            likes: Vec::new(),
        }
    }

    pub fn to_document(&self) -> Document {
        Document::new()
            .with("_id", self.id)
            .with("username", self.username.clone())
            .with(
                "likes",
                Value::Array(self.likes.iter().map(|id| Value::Uuid(*id)).collect()),
            )
    }

    pub fn from_document(doc: &Document) -> Result<Self, UgcError> {
        Ok(Self {
            id: uuid_field(doc, "users", "_id")?,
            username: string_field(doc, "users", "username")?,
            likes: uuid_array_field(doc, "users", "likes")?,
        })
    }
}

/// A catalog movie: unique title, denormalized like counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub likes_count: i64,
}

impl Movie {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            likes_count: 0,
        }
    }

    pub fn to_document(&self) -> Document {
        Document::new()
            .with("_id", self.id)
            .with("title", self.title.clone())
            .with("likes_count", self.likes_count)
    }

    pub fn from_document(doc: &Document) -> Result<Self, UgcError> {
        Ok(Self {
            id: uuid_field(doc, "movies", "_id")?,
            title: string_field(doc, "movies", "title")?,
            likes_count: integer_field(doc, "movies", "likes_count")?,
        })
    }
}

/// A rating a user gave to a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub rate: u8,
}

impl Like {
    /// Create a like, validating the rate range
    pub fn new(
        user_id: Uuid,
        content_id: Uuid,
        created_at: DateTime<Utc>,
        rate: u8,
    ) -> Result<Self, UgcError> {
        if rate > MAX_RATE {
            return Err(UgcError::RateOutOfRange(rate));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            content_id,
            created_at,
            rate,
        })
    }
}

impl UgcDocument for Like {
    const COLLECTION: &'static str = "likes";
    type Patch = LikePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_document(&self) -> Document {
        Document::new()
            .with("_id", self.id)
            .with("user_id", self.user_id)
            .with("content_id", self.content_id)
            .with("created_at", self.created_at)
            .with("rate", self.rate as i64)
    }

    fn from_document(doc: &Document) -> Result<Self, UgcError> {
        let rate = integer_field(doc, Self::COLLECTION, "rate")?;
        if !(0..=MAX_RATE as i64).contains(&rate) {
            return Err(UgcError::malformed(Self::COLLECTION, "rate"));
        }
        Ok(Self {
            id: uuid_field(doc, Self::COLLECTION, "_id")?,
            user_id: uuid_field(doc, Self::COLLECTION, "user_id")?,
            content_id: uuid_field(doc, Self::COLLECTION, "content_id")?,
            created_at: datetime_field(doc, Self::COLLECTION, "created_at")?,
            rate: rate as u8,
        })
    }
}

/// A saved content reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(user_id: Uuid, content_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content_id,
            created_at,
        }
    }
}

impl UgcDocument for Bookmark {
    const COLLECTION: &'static str = "bookmarks";
    type Patch = BookmarkPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_document(&self) -> Document {
        Document::new()
            .with("_id", self.id)
            .with("user_id", self.user_id)
            .with("content_id", self.content_id)
            .with("created_at", self.created_at)
    }

    fn from_document(doc: &Document) -> Result<Self, UgcError> {
        Ok(Self {
            id: uuid_field(doc, Self::COLLECTION, "_id")?,
            user_id: uuid_field(doc, Self::COLLECTION, "user_id")?,
            content_id: uuid_field(doc, Self::COLLECTION, "content_id")?,
            created_at: datetime_field(doc, Self::COLLECTION, "created_at")?,
        })
    }
}

/// A free-text comment on a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

impl Comment {
    pub fn new(user_id: Uuid, content_id: Uuid, created_at: DateTime<Utc>, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content_id,
            created_at,
            text: text.to_string(),
        }
    }
}

impl UgcDocument for Comment {
    const COLLECTION: &'static str = "comments";
    type Patch = CommentPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn to_document(&self) -> Document {
        Document::new()
            .with("_id", self.id)
            .with("user_id", self.user_id)
            .with("content_id", self.content_id)
            .with("created_at", self.created_at)
            .with("text", self.text.clone())
    }

    fn from_document(doc: &Document) -> Result<Self, UgcError> {
        Ok(Self {
            id: uuid_field(doc, Self::COLLECTION, "_id")?,
            user_id: uuid_field(doc, Self::COLLECTION, "user_id")?,
            content_id: uuid_field(doc, Self::COLLECTION, "content_id")?,
            created_at: datetime_field(doc, Self::COLLECTION, "created_at")?,
            text: string_field(doc, Self::COLLECTION, "text")?,
        })
    }
}

/// Partial update for a like
#[derive(Debug, Clone, Default)]
pub struct LikePatch {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub content_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub rate: Option<u8>,
}

impl UgcPatch for LikePatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn changes(&self) -> Document {
        let mut changes = base_changes(self.user_id, self.content_id, self.created_at);
        if let Some(rate) = self.rate {
            changes.set("rate", rate as i64);
        }
        changes
    }
}

/// Partial update for a bookmark
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub content_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl UgcPatch for BookmarkPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn changes(&self) -> Document {
        base_changes(self.user_id, self.content_id, self.created_at)
    }
}

/// Partial update for a comment
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub content_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub text: Option<String>,
}

impl UgcPatch for CommentPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn changes(&self) -> Document {
        let mut changes = base_changes(self.user_id, self.content_id, self.created_at);
        if let Some(text) = &self.text {
            changes.set("text", text.clone());
        }
        changes
    }
}

fn base_changes(
    user_id: Option<Uuid>,
    content_id: Option<Uuid>,
    created_at: Option<DateTime<Utc>>,
) -> Document {
    let mut changes = Document::new();
    if let Some(user_id) = user_id {
        changes.set("user_id", user_id);
    }
    if let Some(content_id) = content_id {
        changes.set("content_id", content_id);
    }
    if let Some(created_at) = created_at {
        changes.set("created_at", created_at);
    }
    changes
}

fn uuid_field(doc: &Document, collection: &str, field: &str) -> Result<Uuid, UgcError> {
    doc.get(field)
        .and_then(Value::as_uuid)
        .ok_or_else(|| UgcError::malformed(collection, field))
}

fn string_field(doc: &Document, collection: &str, field: &str) -> Result<String, UgcError> {
    doc.get(field)
        .and_then(Value::as_string)
        .map(str::to_string)
        .ok_or_else(|| UgcError::malformed(collection, field))
}

fn integer_field(doc: &Document, collection: &str, field: &str) -> Result<i64, UgcError> {
    doc.get(field)
        .and_then(Value::as_integer)
        .ok_or_else(|| UgcError::malformed(collection, field))
}

fn datetime_field(
    doc: &Document,
    collection: &str,
    field: &str,
) -> Result<DateTime<Utc>, UgcError> {
    doc.get(field)
        .and_then(Value::as_datetime)
        .copied()
        .ok_or_else(|| UgcError::malformed(collection, field))
}

fn uuid_array_field(doc: &Document, collection: &str, field: &str) -> Result<Vec<Uuid>, UgcError> {
    let items = doc
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| UgcError::malformed(collection, field))?;
    items
        .iter()
        .map(|item| {
            item.as_uuid()
                .ok_or_else(|| UgcError::malformed(collection, field))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn like_rejects_out_of_range_rate() {
        let created = Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap();
        let err = Like::new(Uuid::new_v4(), Uuid::new_v4(), created, 11).unwrap_err();
        assert!(matches!(err, UgcError::RateOutOfRange(11)));
        assert!(Like::new(Uuid::new_v4(), Uuid::new_v4(), created, 10).is_ok());
    }

    #[test]
    fn like_round_trips_through_document() {
        let created = Utc.with_ymd_and_hms(2021, 1, 2, 10, 0, 0).unwrap();
        let like = Like::new(Uuid::new_v4(), Uuid::new_v4(), created, 5).unwrap();
        let restored = Like::from_document(&like.to_document()).unwrap();
        assert_eq!(like, restored);
    }

    #[test]
    fn malformed_document_names_the_field() {
        let doc = Document::new().with("_id", Uuid::new_v4());
        let err = Comment::from_document(&doc).unwrap_err();
        assert!(matches!(err, UgcError::Malformed { ref field, .. } if field == "user_id"));
    }
}
