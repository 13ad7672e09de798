// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Find execution against a collection's primary storage and indexes

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use crate::index::{IndexKey, IndexSet};
use crate::store::types::DocKey;
use crate::store::value::{total_cmp, Document, Value};

use super::filter::{Filter, FindOptions, SortOrder};
use super::plan::{plan_scan, PlannedScan, QueryPlan};

/// Execute a find: planned index scan when one applies, collection scan
/// otherwise. Results come back in key order (index scans) or `_id` order
/// (collection scans) unless a sort option overrides it.
pub(crate) fn find(
    docs: &BTreeMap<DocKey, Document>,
    indexes: &IndexSet,
    filter: &Filter,
    options: &FindOptions,
) -> Vec<Document> {
    let mut results = match plan_scan(indexes, filter) {
        Some(scan) => run_index_scan(docs, &scan),
        None => docs
            .values()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect(),
    };

    if let Some((field, order)) = &options.sort {
        results.sort_by(|a, b| {
            let av = a.get(field).unwrap_or(&Value::Null);
            let bv = b.get(field).unwrap_or(&Value::Null);
            let ord = total_cmp(av, bv);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}

/// Explain how a find over this filter would access the collection
pub(crate) fn explain(indexes: &IndexSet, filter: &Filter) -> QueryPlan {
    plan_scan(indexes, filter)
        .map(|scan| scan.summarize())
        .unwrap_or(QueryPlan::CollectionScan)
}

fn run_index_scan(docs: &BTreeMap<DocKey, Document>, scan: &PlannedScan<'_>) -> Vec<Document> {
    // Scan starts at the equality prefix, extended by the range's lower
    // bound when present. A prefix-only key sorts before every full key
    // sharing that prefix, so Included is always the right start bound.
    let mut start = scan.prefix.clone();
    if let Some(range) = &scan.range {
        match &range.min {
            Bound::Included(v) | Bound::Excluded(v) => start.push(v.clone()),
            Bound::Unbounded => {}
        }
    }

    let mut seen: BTreeSet<DocKey> = BTreeSet::new();
    let mut results = Vec::new();

    for (key, id) in scan.index.scan_from(Bound::Included(IndexKey(start))) {
        let components = key.components();

        let prefix_matches = scan
            .prefix
            .iter()
            .zip(components.iter())
            .all(|(p, c)| total_cmp(c, p) == Ordering::Equal);
        if !prefix_matches {
            break;
        }

        if let Some(range) = &scan.range {
            let component = &components[scan.prefix.len()];
            if let Bound::Excluded(v) = &range.min {
                if total_cmp(component, v) == Ordering::Equal {
                    continue;
                }
            }
            match &range.max {
                Bound::Included(v) => {
                    if total_cmp(component, v) == Ordering::Greater {
                        break;
                    }
                }
                Bound::Excluded(v) => {
                    if total_cmp(component, v) != Ordering::Less {
                        break;
                    }
                }
                Bound::Unbounded => {}
            }
        }

        // Multikey indexes can yield the same document several times
        if !seen.insert(id.clone()) {
            continue;
        }

        if let Some(doc) = docs.get(id) {
            if scan.residual.iter().all(|f| f.matches(doc)) {
                results.push(doc.clone());
            }
        }
    }

    results
}
