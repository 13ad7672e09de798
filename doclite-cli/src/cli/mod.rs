// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for DocLite
//!
//! Provides command-line interface for schema bootstrap, fixture loading,
//! query-plan inspection and profiler statistics.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use handlers::{handle_bootstrap, handle_catalog, handle_explain, handle_stats};
