// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query planning over a collection's indexes
//!
//! The planner matches a filter's conjuncts against each index: a run of
//! equality predicates over the leading key fields, optionally followed by
//! one range predicate on the next field. The index covering the most
//! predicates wins; anything it does not cover is applied as a residual
//! predicate after the scan.

use std::fmt;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::index::{fold_value, IndexSet, SecondaryIndex};
use crate::store::value::Value;

use super::filter::Filter;

/// How a find operation accesses the collection.
///
/// This is the store's query-plan explanation: it names the serving index
/// or reports a full collection scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryPlan {
    /// Served by an index
    IndexScan {
        index: String,
        /// Key fields matched by equality, in key order
        prefix_fields: Vec<String>,
        /// Key field matched by a range predicate, if any
        range_field: Option<String>,
    },
    /// Full scan of the primary storage
    CollectionScan,
}

impl QueryPlan {
    /// Name of the serving index, if the plan uses one
    pub fn index_name(&self) -> Option<&str> {
        match self {
            QueryPlan::IndexScan { index, .. } => Some(index),
            QueryPlan::CollectionScan => None,
        }
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryPlan::IndexScan {
                index,
                prefix_fields,
                range_field,
            } => {
                write!(f, "IXSCAN {}", index)?;
                if !prefix_fields.is_empty() {
                    write!(f, " eq({})", prefix_fields.join(", "))?;
                }
                if let Some(field) = range_field {
                    write!(f, " range({})", field)?;
                }
                Ok(())
            }
            QueryPlan::CollectionScan => write!(f, "COLLSCAN"),
        }
    }
}

/// Range portion of a planned index scan, with bounds already folded under
/// the index collation
#[derive(Debug)]
pub(crate) struct PlannedRange {
    pub field: String,
    pub min: Bound<Value>,
    pub max: Bound<Value>,
}

/// A chosen index access path
pub(crate) struct PlannedScan<'a> {
    pub index: &'a SecondaryIndex,
    /// Folded equality values over the leading key fields
    pub prefix: Vec<Value>,
    pub prefix_fields: Vec<String>,
    pub range: Option<PlannedRange>,
    /// Predicates the index does not cover
    pub residual: Vec<&'a Filter>,
}

impl<'a> PlannedScan<'a> {
    /// Public summary of this access path
    pub fn summarize(&self) -> QueryPlan {
        QueryPlan::IndexScan {
            index: self.index.name().to_string(),
            prefix_fields: self.prefix_fields.clone(),
            range_field: self.range.as_ref().map(|r| r.field.clone()),
        }
    }
}

/// Choose the best index access path for a filter, if any index helps
pub(crate) fn plan_scan<'a>(indexes: &'a IndexSet, filter: &'a Filter) -> Option<PlannedScan<'a>> {
    let conjuncts = filter.conjuncts();
    if conjuncts.is_empty() {
        return None;
    }

    let mut best: Option<(usize, PlannedScan<'a>)> = None;
    for index in indexes.iter() {
        if let Some(candidate) = plan_for_index(index, &conjuncts) {
            let score = candidate.prefix.len() * 2 + candidate.range.is_some() as usize;
            let better = match &best {
                Some((best_score, _)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((score, candidate));
            }
        }
    }
    best.map(|(_, scan)| scan)
}

fn plan_for_index<'a>(
    index: &'a SecondaryIndex,
    conjuncts: &[&'a Filter],
) -> Option<PlannedScan<'a>> {
    let spec = index.spec();
    let collation = spec.collation.as_ref();

    let mut used = vec![false; conjuncts.len()];
    let mut prefix = Vec::new();
    let mut prefix_fields = Vec::new();
    let mut range = None;

    for key_field in &spec.keys {
        // Array probes never use an index: multikey entries are stored
        // per element, not per whole array.
        let eq = conjuncts.iter().enumerate().find(|(i, f)| {
            !used[*i]
                && matches!(f, Filter::Eq(field, probe)
                    if field == key_field && !matches!(probe, Value::Array(_)))
        });
        if let Some((i, Filter::Eq(_, probe))) = eq {
            used[i] = true;
            prefix.push(fold_value(probe, collation));
            prefix_fields.push(key_field.clone());
            continue;
        }

        let rng = conjuncts.iter().enumerate().find(|(i, f)| {
            !used[*i] && matches!(f, Filter::Range { field, .. } if field == key_field)
        });
        if let Some((i, Filter::Range { field, min, max })) = rng {
            used[i] = true;
            range = Some(PlannedRange {
                field: field.clone(),
                min: fold_bound(min, collation),
                max: fold_bound(max, collation),
            });
        }
        break;
    }

    if prefix.is_empty() && range.is_none() {
        return None;
    }

    let residual = conjuncts
        .iter()
        .enumerate()
        .filter(|(i, _)| !used[*i])
        .map(|(_, f)| *f)
        .collect();

    Some(PlannedScan {
        index,
        prefix,
        prefix_fields,
        range,
        residual,
    })
}

fn fold_bound(
    bound: &Bound<Value>,
    collation: Option<&crate::store::collation::Collation>,
) -> Bound<Value> {
    match bound {
        Bound::Unbounded => Bound::Unbounded,
        Bound::Included(v) => Bound::Included(fold_value(v, collation)),
        Bound::Excluded(v) => Bound::Excluded(fold_value(v, collation)),
    }
}
