// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value type system for document fields
//!
//! Supports the data types used by the movies/UGC collections:
//! - Basic types: String, Integer, Double, Boolean, Null
//! - Identifier type: Uuid
//! - Temporal type: DateTime (UTC)
//! - Collections: Array

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Value types for document fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
}

impl Value {
    /// Extract as string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as double, widening integers
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Extract as boolean if possible
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    /// Extract as datetime if possible
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Extract as array if possible
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Double(_) => "Double",
            Value::String(_) => "String",
            Value::Uuid(_) => "Uuid",
            Value::DateTime(_) => "DateTime",
            Value::Array(_) => "Array",
        }
    }

    /// Type rank used for cross-type ordering in index keys.
    ///
    /// Numbers share a rank so Integer and Double compare numerically
    /// against each other.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Double(_) => 2,
            Value::String(_) => 3,
            Value::Uuid(_) => 4,
            Value::DateTime(_) => 5,
            Value::Array(_) => 6,
        }
    }
}

/// Total order over values: type rank first, then value within the type.
///
/// This is the ordering index keys are stored under. Doubles use IEEE total
/// ordering so NaN has a stable position instead of poisoning comparisons.
pub fn total_cmp(a: &Value, b: &Value) -> Ordering {
    let rank = a.type_rank().cmp(&b.type_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Double(x), Value::Double(y)) => x.total_cmp(y),
        (Value::Integer(x), Value::Double(y)) => (*x as f64).total_cmp(y),
        (Value::Double(x), Value::Integer(y)) => x.total_cmp(&(*y as f64)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Uuid(x), Value::Uuid(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (ex, ey) in x.iter().zip(y.iter()) {
                let ord = total_cmp(ex, ey);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        // Ranks matched above, so mixed pairs here are unreachable
        _ => Ordering::Equal,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Uuid(id) => write!(f, "{}", id),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Convert from Rust primitive types to Value
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Uuid(id)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::Array(vec.into_iter().map(Into::into).collect())
    }
}

/// The reserved primary-key field present in every stored document
pub const ID_FIELD: &str = "_id";

/// A schemaless document: ordered field-name to value map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, returning self for builder-style construction
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Set a field
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// The document's `_id` value, if present
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ID_FIELD)
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge another document's fields into this one ($set semantics)
    pub fn merge(&mut self, other: Document) {
        for (field, value) in other.fields {
            self.fields.insert(field, value);
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_type_ordering_follows_type_rank() {
        let ordered = [
            Value::Null,
            Value::Boolean(false),
            Value::Integer(3),
            Value::String("a".into()),
            Value::Uuid(Uuid::nil()),
            Value::DateTime(Utc::now()),
            Value::Array(vec![]),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(total_cmp(&pair[0], &pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn integers_and_doubles_compare_numerically() {
        assert_eq!(
            total_cmp(&Value::Integer(2), &Value::Double(2.5)),
            Ordering::Less
        );
        assert_eq!(
            total_cmp(&Value::Double(3.0), &Value::Integer(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn document_merge_overwrites_fields() {
        let mut doc = Document::new().with("a", 1i64).with("b", "old");
        doc.merge(Document::new().with("b", "new").with("c", true));
        assert_eq!(doc.get("a"), Some(&Value::Integer(1)));
        assert_eq!(doc.get("b"), Some(&Value::String("new".into())));
        assert_eq!(doc.get("c"), Some(&Value::Boolean(true)));
    }
}
