// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Document storage implementation for in-memory collections
//!
//! This module provides:
//! - Value type system for document fields
//! - Collation rules for string comparison
//! - Document collections with index maintenance
//! - The Store handle tying collections and profiling together

pub mod collation;
pub mod collection;
pub mod store_manager;
pub mod types;
pub mod value;

pub use collation::{Collation, Strength};
pub use collection::Collection;
pub use store_manager::Store;
pub use types::{DocKey, StoreError};
pub use value::{Document, Value, ID_FIELD};
