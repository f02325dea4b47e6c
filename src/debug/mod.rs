//! Debug bundle writer for inspecting raw records and shaped outputs.
//!
//! Useful when the upstream API changes a field spelling: the bundle lists
//! every raw key actually observed next to the canonical rows we derived.

use std::collections::BTreeSet;
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

pub fn write_debug_bundle(out: &RunOutput, selection: &str) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir)
        .map_err(|e| AppError::config(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("nrega_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::config(format!("Failed to create debug file: {e}")))?;

    writeln!(file, "# nrega debug bundle").map_err(write_err)?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(file, "- selection: {selection}").map_err(write_err)?;
    writeln!(file, "- source: {}", out.source).map_err(write_err)?;
    writeln!(file, "- records: {}", out.records.len()).map_err(write_err)?;
    if let Some(err) = &out.fetch_error {
        writeln!(file, "- fetch_error: {err}").map_err(write_err)?;
    }

    writeln!(file, "\n## KPI summary").map_err(write_err)?;
    writeln!(file, "| workers | households | expenditure | completed | avg_wage |")
        .map_err(write_err)?;
    writeln!(file, "| - | - | - | - | - |").map_err(write_err)?;
    writeln!(
        file,
        "| {:.0} | {:.0} | {:.2} | {:.0} | {:.2} |",
        out.summary.total_workers,
        out.summary.total_households,
        out.summary.total_expenditure,
        out.summary.completed_works,
        out.summary.average_wage,
    )
    .map_err(write_err)?;

    writeln!(file, "\n## Chart series (top by wage)").map_err(write_err)?;
    writeln!(file, "| rank | district | wage |").map_err(write_err)?;
    writeln!(file, "| - | - | - |").map_err(write_err)?;
    for (rank, entry) in out.chart.iter().enumerate() {
        writeln!(file, "| {} | {} | {:.2} |", rank + 1, entry.label, entry.value)
            .map_err(write_err)?;
    }

    writeln!(file, "\n## Canonical rows").map_err(write_err)?;
    writeln!(
        file,
        "| district | state | wage | workers | households | expenditure | completed |"
    )
    .map_err(write_err)?;
    writeln!(file, "| - | - | - | - | - | - | - |").map_err(write_err)?;
    for row in &out.rows {
        writeln!(
            file,
            "| {} | {} | {:.2} | {:.0} | {:.0} | {:.2} | {:.0} |",
            row.district_name,
            row.state_name,
            row.average_wage_rate,
            row.total_workers,
            row.total_households,
            row.total_expenditure,
            row.completed_works,
        )
        .map_err(write_err)?;
    }

    // Union of raw keys across the dataset: the fastest way to spot a new
    // field spelling that the alias chains don't cover yet.
    let keys: BTreeSet<&str> = out
        .records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();
    writeln!(file, "\n## Observed raw field names").map_err(write_err)?;
    for key in keys {
        writeln!(file, "- `{key}`").map_err(write_err)?;
    }

    Ok(path)
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::config(format!("Failed to write debug bundle: {e}"))
}
