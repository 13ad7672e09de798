// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query filters and find options

use std::cmp::Ordering;
use std::ops::Bound;

use crate::store::value::{total_cmp, Document, Value};

/// A predicate over documents.
///
/// Equality against an array-valued field matches when any element equals
/// the probe value, which is what makes "users whose `likes` contain this
/// movie" an equality query.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Match every document
    All,
    /// Field equals value
    Eq(String, Value),
    /// Field within bounds
    Range {
        field: String,
        min: Bound<Value>,
        max: Bound<Value>,
    },
    /// All sub-filters match
    And(Vec<Filter>),
}

impl Filter {
    /// Equality filter
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    /// Range filter
    pub fn range(field: &str, min: Bound<Value>, max: Bound<Value>) -> Self {
        Filter::Range {
            field: field.to_string(),
            min,
            max,
        }
    }

    /// Inclusive range filter
    pub fn between(field: &str, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Filter::Range {
            field: field.to_string(),
            min: Bound::Included(min.into()),
            max: Bound::Included(max.into()),
        }
    }

    /// Conjunction of filters
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    /// Check a document against this filter
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, probe) => match doc.get(field) {
                Some(Value::Array(items)) if !matches!(probe, Value::Array(_)) => items
                    .iter()
                    .any(|item| total_cmp(item, probe) == Ordering::Equal),
                Some(value) => total_cmp(value, probe) == Ordering::Equal,
                None => probe.is_null(),
            },
            Filter::Range { field, min, max } => match doc.get(field) {
                Some(Value::Array(items)) => {
                    items.iter().any(|item| value_in_bounds(item, min, max))
                }
                Some(value) => value_in_bounds(value, min, max),
                None => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
        }
    }

    /// Flatten nested conjunctions into a list of leaf predicates
    pub(crate) fn conjuncts(&self) -> Vec<&Filter> {
        match self {
            Filter::All => Vec::new(),
            Filter::And(filters) => filters.iter().flat_map(|f| f.conjuncts()).collect(),
            leaf => vec![leaf],
        }
    }
}

fn value_in_bounds(value: &Value, min: &Bound<Value>, max: &Bound<Value>) -> bool {
    let above = match min {
        Bound::Unbounded => true,
        Bound::Included(m) => total_cmp(value, m) != Ordering::Less,
        Bound::Excluded(m) => total_cmp(value, m) == Ordering::Greater,
    };
    let below = match max {
        Bound::Unbounded => true,
        Bound::Included(m) => total_cmp(value, m) != Ordering::Greater,
        Bound::Excluded(m) => total_cmp(value, m) == Ordering::Less,
    };
    above && below
}

/// Sort direction for find results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Options controlling a find operation
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Sort results by a field
    pub sort: Option<(String, SortOrder)>,
    /// Cap the number of returned documents
    pub limit: Option<usize>,
}

impl FindOptions {
    /// Sort ascending by a field
    pub fn sort_by(field: &str) -> Self {
        Self {
            sort: Some((field.to_string(), SortOrder::Ascending)),
            limit: None,
        }
    }

    /// Apply a result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
