//! The `examlens list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use examlens_core::{apply_view, PerformanceBand, ResultLabel};

use crate::{SourceArgs, ViewArgs};

pub fn execute(source: SourceArgs, view: ViewArgs) -> Result<()> {
    let loaded = super::load(&source)?;
    let (filter, sort) = super::view_spec(&view)?;

    let total = loaded.normalized.records.len();
    let visible = apply_view(&loaded.normalized.records, &filter, sort);

    let mut table = Table::new();
    table.set_header(vec![
        "Student", "Exam", "Score", "Percent", "Band", "Result", "Date",
    ]);
    for r in &visible.records {
        table.add_row(vec![
            Cell::new(&r.student_name),
            Cell::new(&r.exam_title),
            Cell::new(format!("{}/{}", r.correct_answers, r.total_questions)),
            Cell::new(format!("{:.1}%", r.score)),
            Cell::new(PerformanceBand::from_score(r.score)),
            Cell::new(ResultLabel::of(r)),
            Cell::new(r.timestamp.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    let filtered = if visible.is_filtered { " (filtered)" } else { "" };
    println!("showing {} of {} results{filtered}", visible.len(), total);

    super::warn_summary(&loaded.normalized);
    Ok(())
}
