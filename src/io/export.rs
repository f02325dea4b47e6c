//! Export shaped dashboard data to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::domain::{CanonicalMetrics, ChartEntry, SummaryExport, SummaryStatistics};
use crate::error::AppError;

/// Write the per-district table to a CSV file.
pub fn write_districts_csv(path: &Path, rows: &[CanonicalMetrics]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "district,state,avg_wage,total_workers,total_households,total_expenditure,completed_works"
    )
    .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.0},{:.2},{:.0}",
            csv_field(&row.district_name),
            csv_field(&row.state_name),
            row.average_wage_rate,
            row.total_workers,
            row.total_households,
            row.total_expenditure,
            row.completed_works,
        )
        .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the KPI summary plus chart series to a JSON file.
pub fn write_summary_json(
    path: &Path,
    selection: &str,
    source: &str,
    district_count: usize,
    summary: &SummaryStatistics,
    chart: &[ChartEntry],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    let export = SummaryExport {
        tool: "nrega".to_string(),
        generated_at: Local::now().to_rfc3339(),
        selection: selection.to_string(),
        source: source.to_string(),
        districts: district_count,
        summary: summary.clone(),
        chart: chart.to_vec(),
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::config(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

/// Quote a CSV field when it contains separators or quotes.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_fields_quote_separators() {
        assert_eq!(csv_field("Bansur"), "Bansur");
        assert_eq!(csv_field("A, B"), "\"A, B\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
