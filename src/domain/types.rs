//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while shaping a fetch cycle's records
//! - exported to JSON/CSV
//! - rendered by both the CLI and the TUI without conversion

use std::path::PathBuf;

use serde::Serialize;

/// One district-period observation exactly as the upstream API returned it.
///
/// Field names are NOT stable across responses: the same logical quantity may
/// appear as `Total_Households_Worked`, `Total Households Worked`, or
/// `TotalHouseholdsWorked` depending on which export produced the row. All
/// access goes through the alias chains in [`crate::fields`].
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Filter sentinel meaning "no state filtering applied".
pub const ALL_STATES: &str = "All";

/// How many districts the wage chart shows.
pub const CHART_TOP_N: usize = 12;

/// Fixed-shape per-district metrics derived from one `RawRecord`.
///
/// Counts are clamped to be non-negative; a zero `average_wage_rate` means
/// "unknown / not reported", not a zero wage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalMetrics {
    pub district_name: String,
    pub state_name: String,
    pub total_workers: f64,
    pub total_households: f64,
    pub total_expenditure: f64,
    pub completed_works: f64,
    pub average_wage_rate: f64,
}

/// KPI aggregate over a filtered record set.
///
/// `Default` is the all-zero summary, which is also the defined result for an
/// empty input set (never NaN).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_workers: f64,
    pub total_households: f64,
    pub total_expenditure: f64,
    pub completed_works: f64,
    /// Mean of the *non-zero* per-district wages; zero when none report one.
    pub average_wage: f64,
}

/// One labelled bar/point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
}

/// Canonical metrics extended with per-1000-household rates.
///
/// Rates divide by the household count floored to 1, so a district reporting
/// zero (or no) households yields finite rates rather than infinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    #[serde(flatten)]
    pub metrics: CanonicalMetrics,
    pub active_workers: f64,
    pub ongoing_works: f64,
    pub active_per_1000hh: f64,
    pub ongoing_per_1000hh: f64,
    pub completed_per_1000hh: f64,
}

/// A one-shot run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// State selection; [`ALL_STATES`] means no filtering.
    pub state: String,
    pub top_n: usize,
    pub chart_width: usize,
    pub show_chart: bool,
    pub speak: bool,
    pub export_csv: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

/// Schema of the `--export-summary` JSON file.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport {
    pub tool: String,
    pub generated_at: String,
    pub selection: String,
    pub source: String,
    pub districts: usize,
    pub summary: SummaryStatistics,
    pub chart: Vec<ChartEntry>,
}
