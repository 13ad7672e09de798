// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers
//!
//! Each handler builds an in-process store, applies the movies-platform
//! catalog, and reports what happened. The store lives for the duration of
//! the command; this CLI is a driver for inspecting the schema contract,
//! not a server.

use colored::Colorize;
use std::ops::Bound;
use uuid::Uuid;

use doclite::catalog::{bootstrap, SchemaCatalog};
use doclite::query::{Filter, FindOptions};
use doclite::store::{Store, Value};
use doclite::ugc::load_sample_data;

use super::commands::OutputFormat;
use super::output;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn bootstrapped_store() -> Result<Store, Box<dyn std::error::Error>> {
    let store = Store::new();
    bootstrap(&store, &SchemaCatalog::movies_platform())?;
    Ok(store)
}

/// Apply the schema catalog and optionally load fixtures
pub fn handle_bootstrap(fixtures: bool, format: OutputFormat) -> CliResult {
    let store = Store::new();
    let report = bootstrap(&store, &SchemaCatalog::movies_platform())?;

    let fixture_report = if fixtures {
        Some(load_sample_data(&store)?)
    } else {
        None
    };

    match format {
        OutputFormat::Table => print!("{}", output::bootstrap_table(&report, fixture_report)),
        OutputFormat::Json => println!("{}", output::bootstrap_json(&report, fixture_report)?),
    }
    Ok(())
}

/// Explain the canonical queries against the declared indexes
pub fn handle_explain(format: OutputFormat) -> CliResult {
    let store = bootstrapped_store()?;
    load_sample_data(&store)?;

    let movies = store.collection("movies")?;
    let users = store.collection("users")?;

    let sample_id = Uuid::new_v4();
    let cases = vec![
        (
            "movies: likes_count in [1, 10]".to_string(),
            movies.explain(&Filter::between("likes_count", 1i64, 10i64)),
        ),
        (
            "movies: title == \"matrix\"".to_string(),
            movies.explain(&Filter::eq("title", "matrix")),
        ),
        (
            "movies: _id == ? and likes_count >= 1".to_string(),
            movies.explain(&Filter::and(vec![
                Filter::eq("_id", sample_id),
                Filter::range(
                    "likes_count",
                    Bound::Included(Value::Integer(1)),
                    Bound::Unbounded,
                ),
            ])),
        ),
        (
            "users: likes contains ?".to_string(),
            users.explain(&Filter::eq("likes", sample_id)),
        ),
        (
            "movies: director == \"Wachowski\"".to_string(),
            movies.explain(&Filter::eq("director", "Wachowski")),
        ),
    ];

    match format {
        OutputFormat::Table => print!("{}", output::explain_table(&cases)),
        OutputFormat::Json => println!("{}", output::explain_json(&cases)?),
    }
    Ok(())
}

/// Print the movies-platform catalog declaration
pub fn handle_catalog() -> CliResult {
    println!("{}", SchemaCatalog::movies_platform().to_json()?);
    Ok(())
}

/// Exercise the store and print profiler statistics
pub fn handle_stats() -> CliResult {
    let store = bootstrapped_store()?;
    load_sample_data(&store)?;

    // Drive some reads through the profiler
    let movies = store.collection("movies")?;
    movies.find(
        &Filter::between("likes_count", 0i64, 100i64),
        &FindOptions::default(),
    );
    movies.find(&Filter::eq("title", "Matrix"), &FindOptions::default());

    let stats = store.profiler_stats();
    print!("{}", output::stats_table(&stats));

    if stats.slow_ops > 0 {
        println!(
            "{}",
            format!("{} slow operations logged", stats.slow_ops).yellow()
        );
    }
    Ok(())
}
