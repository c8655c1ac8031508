//! The `examlens validate` command.

use anyhow::Result;

use crate::SourceArgs;

pub fn execute(source: SourceArgs, strict: bool) -> Result<()> {
    let loaded = super::load(&source)?;

    println!(
        "Source: {} ({} submissions, {} exams)",
        loaded.source_name, loaded.submission_count, loaded.exam_count
    );

    let warnings = &loaded.normalized.warnings;
    for w in warnings {
        println!("  [{}] WARNING: {w}", w.record_id());
    }

    if warnings.is_empty() {
        println!("All records valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
        if strict {
            anyhow::bail!("{} warning(s) found in strict mode", warnings.len());
        }
    }

    Ok(())
}
