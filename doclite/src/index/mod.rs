// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Secondary indexing for document collections
//!
//! Ordered indexes over document fields: single-field, compound, multikey
//! (array-valued fields), optionally unique and optionally collated.

pub mod errors;
pub mod manager;
pub mod secondary;
pub mod types;

pub use errors::IndexError;
pub use manager::IndexSet;
pub use secondary::SecondaryIndex;
pub use types::{encode_document, fold_value, IndexKey, IndexSpec, ID_INDEX};
