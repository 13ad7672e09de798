// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Type definitions for the indexing system

use crate::store::collation::Collation;
use crate::store::value::{total_cmp, Document, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::IndexError;

/// Name of the implicit primary-key index every collection carries
pub const ID_INDEX: &str = "_id_";

/// Declarative description of a secondary index.
///
/// All keys are ascending; compound ordering follows declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Index name, unique within the collection
    pub name: String,

    /// Indexed fields in declaration order
    pub keys: Vec<String>,

    /// Reject entries that would duplicate an existing key
    pub unique: bool,

    /// Collation applied to string keys; binary comparison when absent
    pub collation: Option<Collation>,
}

impl IndexSpec {
    /// Create a non-unique single-field index
    pub fn on(name: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            keys: vec![field.to_string()],
            unique: false,
            collation: None,
        }
    }

    /// Create a compound non-unique index
    pub fn compound(name: &str, fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keys: fields.iter().map(|f| f.to_string()).collect(),
            unique: false,
            collation: None,
        }
    }

    /// Mark the index unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Attach a collation
    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = Some(collation);
        self
    }
}

/// An encoded index key tuple.
///
/// String components are already folded under the index collation, so plain
/// value ordering gives the collated order.
#[derive(Debug, Clone)]
pub struct IndexKey(pub Vec<Value>);

impl IndexKey {
    pub fn components(&self) -> &[Value] {
        &self.0
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let ord = total_cmp(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", component)?;
        }
        write!(f, ")")
    }
}

/// Fold a single value for storage under an index collation.
///
/// Only strings are affected; array elements fold recursively.
pub fn fold_value(value: &Value, collation: Option<&Collation>) -> Value {
    match (value, collation) {
        (Value::String(s), Some(c)) => Value::String(c.sort_key(s)),
        (Value::Array(items), Some(_)) => {
            Value::Array(items.iter().map(|v| fold_value(v, collation)).collect())
        }
        _ => value.clone(),
    }
}

/// Encode the key tuples a document contributes to an index.
///
/// A missing field indexes as Null. An array value in exactly one key
/// position makes the index multikey: one tuple per element (an empty array
/// indexes as Null). Arrays in more than one key position are rejected.
pub fn encode_document(doc: &Document, spec: &IndexSpec) -> Result<Vec<IndexKey>, IndexError> {
    let collation = spec.collation.as_ref();

    let mut array_position = None;
    let mut scalars: Vec<Value> = Vec::with_capacity(spec.keys.len());
    for (position, field) in spec.keys.iter().enumerate() {
        let value = doc.get(field).cloned().unwrap_or(Value::Null);
        if matches!(value, Value::Array(_)) {
            if array_position.is_some() {
                return Err(IndexError::invalid_key(format!(
                    "index '{}' cannot span two array fields",
                    spec.name
                )));
            }
            array_position = Some(position);
        }
        scalars.push(value);
    }

    match array_position {
        None => {
            let components = scalars
                .iter()
                .map(|v| fold_value(v, collation))
                .collect::<Vec<_>>();
            Ok(vec![IndexKey(components)])
        }
        Some(position) => {
            let elements = match &scalars[position] {
                Value::Array(items) if items.is_empty() => vec![Value::Null],
                Value::Array(items) => items.clone(),
                _ => unreachable!("array position always holds an array"),
            };
            let mut keys = Vec::with_capacity(elements.len());
            for element in elements {
                let mut components = Vec::with_capacity(scalars.len());
                for (i, value) in scalars.iter().enumerate() {
                    let component = if i == position { &element } else { value };
                    components.push(fold_value(component, collation));
                }
                keys.push(IndexKey(components));
            }
            Ok(keys)
        }
    }
}
