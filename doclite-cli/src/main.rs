// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! DocLite CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    // Determine log level from CLI args or environment variable
    let log_level = if cli.verbose {
        // -v/--verbose flag takes precedence
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        // --log-level flag
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    // Handle commands
    match cli.command {
        Commands::Version => {
            println!("{} {}", "DocLite".bold().green(), doclite::VERSION);
            println!("Embedded document store");
            Ok(())
        }

        Commands::Bootstrap { fixtures, format } => cli::handle_bootstrap(fixtures, format),

        Commands::Explain { format } => cli::handle_explain(format),

        Commands::Catalog => cli::handle_catalog(),

        Commands::Stats => cli::handle_stats(),
    }
}
