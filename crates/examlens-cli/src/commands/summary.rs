//! The `examlens summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examlens_core::report::{Dashboard, SeriesScope};

use crate::SourceArgs;

pub fn execute(source: SourceArgs, format: String, output: Option<PathBuf>) -> Result<()> {
    let loaded = super::load(&source)?;

    // Students see their own completed attempts in the series; admins see all.
    let scope = if loaded.viewer.is_some() {
        SeriesScope::Completed
    } else {
        SeriesScope::All
    };
    let dashboard = Dashboard::build(&loaded.normalized.records, loaded.now, scope);

    if let Some(path) = &output {
        dashboard.save_json(path)?;
        eprintln!("Dashboard written to {}", path.display());
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        "text" => print_text(&dashboard, &loaded.source_name, loaded.viewer.as_deref()),
        other => anyhow::bail!("unknown format `{other}`, expected `text` or `json`"),
    }

    super::warn_summary(&loaded.normalized);
    Ok(())
}

fn print_text(dashboard: &Dashboard, source_name: &str, viewer: Option<&str>) {
    let stats = &dashboard.statistics;
    match viewer {
        Some(id) => println!("Results for student {id} ({source_name})"),
        None => println!("Results for all students ({source_name})"),
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Records"), Cell::new(dashboard.record_count)]);
    table.add_row(vec![Cell::new("Students"), Cell::new(stats.total_students)]);
    table.add_row(vec![Cell::new("Exams"), Cell::new(stats.total_exams)]);
    table.add_row(vec![
        Cell::new("Average score"),
        Cell::new(format!("{}%", stats.rounded_average())),
    ]);
    table.add_row(vec![
        Cell::new("Highest score"),
        Cell::new(format!("{}%", stats.highest_score)),
    ]);
    table.add_row(vec![
        Cell::new("Lowest score"),
        Cell::new(format!("{}%", stats.lowest_score)),
    ]);
    table.add_row(vec![Cell::new("Failed"), Cell::new(stats.failed_count)]);
    table.add_row(vec![
        Cell::new("Pass rate"),
        Cell::new(format!("{:.1}%", stats.pass_rate)),
    ]);
    println!("{table}");

    let mut bands = Table::new();
    bands.set_header(vec!["Score band", "Count"]);
    for (label, count) in dashboard
        .distribution
        .labels
        .iter()
        .zip(&dashboard.distribution.counts)
    {
        bands.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!("{bands}");

    println!(
        "Passed: {}  Failed: {}",
        dashboard.pass_fail.passed, dashboard.pass_fail.failed
    );
}
