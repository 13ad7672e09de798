// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Filtered reads over collections
//!
//! This module provides:
//! - Filters (equality, range, conjunction) and find options
//! - An index-aware planner and executor
//! - Query-plan explanation naming the serving index

pub mod executor;
pub mod filter;
pub mod plan;

pub use filter::{Filter, FindOptions, SortOrder};
pub use plan::QueryPlan;
