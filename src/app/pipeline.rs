//! Shared "fetch and shape" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> filter -> canonicalize -> summarize -> rank
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::api::{PerfClient, PerformancePayload};
use crate::domain::{ALL_STATES, CanonicalMetrics, ChartEntry, RawRecord, SummaryStatistics};
use crate::engine;

/// Source label shown when the fetch itself failed.
pub const FALLBACK_SOURCE: &str = "Error / Fallback";

/// All computed outputs of one fetch cycle.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: String,
    /// Present when the fetch failed and the dataset degraded to empty.
    pub fetch_error: Option<String>,
    pub records: Vec<RawRecord>,
    pub states: Vec<String>,
    pub rows: Vec<CanonicalMetrics>,
    pub summary: SummaryStatistics,
    pub chart: Vec<ChartEntry>,
}

/// Fetch performance records and shape them for the current selection.
///
/// A failed fetch never propagates: the output degrades to an empty dataset
/// with the fallback source label, so callers always have a valid (possibly
/// all-zero) view to render.
pub fn run_dashboard(client: &PerfClient, selection: &str, top_n: usize) -> RunOutput {
    let state_param = state_query_param(selection);
    match client.fetch_performance(state_param) {
        Ok(payload) => shape_payload(payload, selection, top_n),
        Err(err) => {
            let mut out = shape_payload(
                PerformancePayload {
                    source: FALLBACK_SOURCE.to_string(),
                    records: Vec::new(),
                },
                selection,
                top_n,
            );
            out.fetch_error = Some(err.to_string());
            out
        }
    }
}

/// Shape an already-fetched payload (pure; this is what the TUI re-runs when
/// the selection changes without refetching).
pub fn shape_payload(payload: PerformancePayload, selection: &str, top_n: usize) -> RunOutput {
    let states = engine::list_states(&payload.records);
    let filtered = engine::filter_by_state(&payload.records, selection);
    let rows: Vec<CanonicalMetrics> = filtered.iter().map(engine::canonicalize).collect();
    let summary = engine::summarize(&filtered);
    let chart = engine::top_by_wage(&filtered, top_n);

    RunOutput {
        source: payload.source,
        fetch_error: None,
        records: payload.records,
        states,
        rows,
        summary,
        chart,
    }
}

/// "All" (or empty) means no server-side filtering.
pub fn state_query_param(selection: &str) -> Option<&str> {
    let trimmed = selection.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_STATES) {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().expect("test record must be an object").clone()
    }

    #[test]
    fn shape_payload_filters_and_aggregates() {
        let payload = PerformancePayload {
            source: "data.gov.in".to_string(),
            records: vec![
                record(json!({
                    "State Name": "Bihar",
                    "District Name": "Gaya",
                    "Total_No_of_Workers": 100,
                    "Average_Wage_rate_per_day_per_person": 210,
                })),
                record(json!({
                    "State Name": "Kerala",
                    "District Name": "Kollam",
                    "Total_No_of_Workers": 50,
                    "Average_Wage_rate_per_day_per_person": 290,
                })),
            ],
        };

        let out = shape_payload(payload, "bihar", 12);
        assert_eq!(out.source, "data.gov.in");
        assert_eq!(out.states, vec!["All", "Bihar", "Kerala"]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].district_name, "Gaya");
        assert_eq!(out.summary.total_workers, 100.0);
        assert_eq!(out.chart.len(), 1);
        assert!(out.fetch_error.is_none());
    }

    #[test]
    fn state_query_param_treats_sentinel_as_unfiltered() {
        assert_eq!(state_query_param(ALL_STATES), None);
        assert_eq!(state_query_param("all"), None);
        assert_eq!(state_query_param(""), None);
        assert_eq!(state_query_param(" Bihar "), Some("Bihar"));
    }
}
