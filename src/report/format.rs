//! Reporting utilities: KPI summary and formatted terminal tables.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use num_format::{Locale, ToFormattedString};

use crate::domain::{ALL_STATES, CanonicalMetrics, NormalizedRecord, SummaryStatistics};

/// Indian digit grouping (`12,34,567`), matching the upstream portal.
pub fn fmt_count(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en_IN)
}

pub fn fmt_rupees(value: f64) -> String {
    format!("₹{}", fmt_count(value))
}

pub fn fmt_rate(value: f64) -> String {
    format!("{value:.1}")
}

/// Format the KPI block for the current selection.
pub fn format_summary(
    selection: &str,
    source: &str,
    district_count: usize,
    summary: &SummaryStatistics,
    fetch_note: Option<&str>,
) -> String {
    let mut out = String::new();

    out.push_str("=== MGNREGA District Performance ===\n");
    let scope = if selection.trim().is_empty() || selection.eq_ignore_ascii_case(ALL_STATES) {
        "All States (latest month available)".to_string()
    } else {
        selection.to_string()
    };
    out.push_str(&format!("Scope: {scope}\n"));
    out.push_str(&format!("Data source: {source} | districts: {district_count}\n"));
    if let Some(note) = fetch_note {
        out.push_str(&format!("(fetch failed: {note})\n"));
    }
    out.push('\n');

    out.push_str(&format!("Total workers     : {}\n", fmt_count(summary.total_workers)));
    out.push_str(&format!("Households worked : {}\n", fmt_count(summary.total_households)));
    out.push_str(&format!("Total expenditure : {}\n", fmt_rupees(summary.total_expenditure)));
    out.push_str(&format!("Completed works   : {}\n", fmt_count(summary.completed_works)));
    out.push_str(&format!("Avg daily wage    : {}\n", fmt_rupees(summary.average_wage)));

    out
}

/// Format the per-district table for the primary view.
pub fn format_district_table(rows: &[CanonicalMetrics]) -> String {
    if rows.is_empty() {
        return "No data found for selected state.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<22} {:<18} {:>9} {:>12} {:>12} {:>14} {:>10}\n",
        "District", "State", "Wage(₹)", "Workers", "Households", "Exp(₹)", "Completed"
    ));
    out.push_str(&format!("{}\n", "-".repeat(102)));

    for row in rows {
        out.push_str(&format!(
            "{:<22} {:<18} {:>9} {:>12} {:>12} {:>14} {:>10}\n",
            clip(&row.district_name, 22),
            clip(&row.state_name, 18),
            fmt_count(row.average_wage_rate),
            fmt_count(row.total_workers),
            fmt_count(row.total_households),
            fmt_count(row.total_expenditure),
            fmt_count(row.completed_works),
        ));
    }

    out
}

/// Format the per-1000-household rates table for the secondary view.
pub fn format_rates_table(rows: &[NormalizedRecord]) -> String {
    if rows.is_empty() {
        return "No data found for selected district.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<22} {:<18} {:>14} {:>14} {:>16}\n",
        "District", "State", "Active/1000HH", "Ongoing/1000HH", "Completed/1000HH"
    ));
    out.push_str(&format!("{}\n", "-".repeat(88)));

    for row in rows {
        out.push_str(&format!(
            "{:<22} {:<18} {:>14} {:>14} {:>16}\n",
            clip(&row.metrics.district_name, 22),
            clip(&row.metrics.state_name, 18),
            fmt_rate(row.active_per_1000hh),
            fmt_rate(row.ongoing_per_1000hh),
            fmt_rate(row.completed_per_1000hh),
        ));
    }

    out
}

/// Format the distinct-state listing (sentinel first).
pub fn format_states(states: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("States ({}):\n", states.len()));
    for state in states {
        out.push_str(&format!("- {state}\n"));
    }
    out
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(max.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_indian_grouping() {
        assert_eq!(fmt_count(123_456.0), "1,23,456");
        assert_eq!(fmt_count(1_234_567.0), "12,34,567");
        assert_eq!(fmt_rupees(245.4), "₹245");
    }

    #[test]
    fn summary_block_shows_zero_kpis_without_nan() {
        let text = format_summary("All", "Unknown", 0, &SummaryStatistics::default(), None);
        assert!(text.contains("Total workers     : 0"));
        assert!(text.contains("Avg daily wage    : ₹0"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn summary_block_carries_fetch_note() {
        let text = format_summary(
            "Bihar",
            "Error / Fallback",
            0,
            &SummaryStatistics::default(),
            Some("connection refused"),
        );
        assert!(text.contains("Scope: Bihar"));
        assert!(text.contains("Error / Fallback"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn empty_tables_say_so() {
        assert!(format_district_table(&[]).contains("No data found"));
        assert!(format_rates_table(&[]).contains("No data found"));
    }

    #[test]
    fn district_table_renders_one_line_per_row() {
        let rows = vec![CanonicalMetrics {
            district_name: "Bansur".to_string(),
            state_name: "Rajasthan".to_string(),
            total_workers: 12_345.0,
            total_households: 10_000.0,
            total_expenditure: 1_234_567.0,
            completed_works: 123.0,
            average_wage_rate: 245.0,
        }];
        let text = format_district_table(&rows);
        assert!(text.contains("Bansur"));
        assert!(text.contains("12,34,567"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn long_names_are_clipped() {
        assert_eq!(clip("abcdef", 6), "abcdef");
        assert_eq!(clip("abcdefg", 6), "abcde…");
    }
}
