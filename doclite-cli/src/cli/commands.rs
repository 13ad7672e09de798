// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

/// DocLite - A lightweight embedded document store
#[derive(Parser)]
#[command(name = "doclite", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print version information
    Version,

    /// Apply the movies-platform schema catalog to a fresh store
    Bootstrap {
        /// Load the sample dataset after bootstrap
        #[arg(long)]
        fixtures: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show how the declared indexes serve the canonical queries
    Explain {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the movies-platform schema catalog as JSON
    Catalog,

    /// Load the sample dataset and print profiler statistics
    Stats,
}

/// Output formats for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
