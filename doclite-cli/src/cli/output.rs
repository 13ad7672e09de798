// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use doclite::catalog::BootstrapReport;
use doclite::profiler::ProfilerStats;
use doclite::query::QueryPlan;
use doclite::ugc::FixtureReport;

/// Format a bootstrap report as a table
pub fn bootstrap_table(report: &BootstrapReport, fixtures: Option<FixtureReport>) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Bootstrap complete".bold().green()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Kind").fg(Color::Green),
        Cell::new("Name").fg(Color::Green),
        Cell::new("Status").fg(Color::Green),
    ]);
    for name in &report.collections_created {
        table.add_row(vec!["collection", name, "created"]);
    }
    for name in &report.indexes_created {
        table.add_row(vec!["index", name, "created"]);
    }
    for name in &report.indexes_existing {
        table.add_row(vec!["index", name, "already present"]);
    }
    output.push_str(&table.to_string());
    output.push('\n');

    if let Some(fixtures) = fixtures {
        output.push_str(&format!(
            "Fixtures loaded: {} users, {} movies, {} likes, {} bookmarks, {} comments\n",
            fixtures.users, fixtures.movies, fixtures.likes, fixtures.bookmarks, fixtures.comments
        ));
    }
    output
}

/// Format a bootstrap report as JSON
pub fn bootstrap_json(
    report: &BootstrapReport,
    fixtures: Option<FixtureReport>,
) -> Result<String, serde_json::Error> {
    let mut json = serde_json::json!({
        "collections_created": report.collections_created,
        "indexes_created": report.indexes_created,
        "indexes_existing": report.indexes_existing,
    });
    if let Some(fixtures) = fixtures {
        if let serde_json::Value::Object(ref mut map) = json {
            map.insert(
                "fixtures".to_string(),
                serde_json::json!({
                    "users": fixtures.users,
                    "movies": fixtures.movies,
                    "likes": fixtures.likes,
                    "bookmarks": fixtures.bookmarks,
                    "comments": fixtures.comments,
                }),
            );
        }
    }
    serde_json::to_string_pretty(&json)
}

/// Format explain results as a table
pub fn explain_table(cases: &[(String, QueryPlan)]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Query plans".bold().green()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Query").fg(Color::Green),
        Cell::new("Plan").fg(Color::Green),
    ]);
    for (query, plan) in cases {
        table.add_row(vec![query.clone(), plan.to_string()]);
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Format explain results as JSON
pub fn explain_json(cases: &[(String, QueryPlan)]) -> Result<String, serde_json::Error> {
    let entries: Vec<serde_json::Value> = cases
        .iter()
        .map(|(query, plan)| {
            serde_json::json!({
                "query": query,
                "plan": plan,
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Format profiler statistics as a table
pub fn stats_table(stats: &ProfilerStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Profiler statistics".bold().green()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec![
        "profiling level".to_string(),
        format!("{:?}", stats.level),
    ]);
    table.add_row(vec![
        "slow threshold (ms)".to_string(),
        stats.slow_threshold_ms.to_string(),
    ]);
    table.add_row(vec![
        "operations observed".to_string(),
        stats.observed_ops.to_string(),
    ]);
    table.add_row(vec![
        "slow operations".to_string(),
        stats.slow_ops.to_string(),
    ]);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
