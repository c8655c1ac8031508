//! The `examlens export` command.

use std::path::PathBuf;

use anyhow::Result;

use examlens_core::apply_view;
use examlens_report::{parse_columns, write_csv_export};

use crate::{SourceArgs, ViewArgs};

const DEFAULT_FILE_NAME: &str = "exam_results.csv";

pub fn execute(
    source: SourceArgs,
    view: ViewArgs,
    output: Option<PathBuf>,
    columns: Option<String>,
) -> Result<()> {
    let loaded = super::load(&source)?;
    let (filter, sort) = super::view_spec(&view)?;
    let visible = apply_view(&loaded.normalized.records, &filter, sort);

    let column_ids: Vec<String> = match columns {
        Some(list) => list.split(',').map(|c| c.trim().to_string()).collect(),
        None => loaded.config.export.columns.clone(),
    };
    let columns = parse_columns(column_ids.as_slice())?;

    let path = output.unwrap_or_else(|| loaded.config.output_dir.join(DEFAULT_FILE_NAME));
    write_csv_export(&visible.records, &columns, &path)?;

    println!("Exported {} result(s) to {}", visible.len(), path.display());
    super::warn_summary(&loaded.normalized);
    Ok(())
}
