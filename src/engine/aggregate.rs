//! Filtering, distinct-state extraction, KPI summary, and chart ranking.

use crate::domain::{ALL_STATES, CanonicalMetrics, ChartEntry, RawRecord, SummaryStatistics};
use crate::fields;

/// Derive the fixed canonical shape from one raw record.
///
/// Counts clamp to non-negative; names degrade to "Unknown".
pub fn canonicalize(record: &RawRecord) -> CanonicalMetrics {
    CanonicalMetrics {
        district_name: fields::resolve_name(record, fields::DISTRICT_NAME)
            .unwrap_or_else(|| fields::UNKNOWN_NAME.to_string()),
        state_name: fields::resolve_name(record, fields::STATE_NAME)
            .unwrap_or_else(|| fields::UNKNOWN_NAME.to_string()),
        total_workers: fields::resolve_number(record, fields::TOTAL_WORKERS, 0.0).max(0.0),
        total_households: fields::resolve_number(record, fields::HOUSEHOLDS_WORKED, 0.0).max(0.0),
        total_expenditure: fields::resolve_number(record, fields::TOTAL_EXPENDITURE, 0.0).max(0.0),
        completed_works: fields::resolve_number(record, fields::COMPLETED_WORKS, 0.0).max(0.0),
        average_wage_rate: fields::resolve_number(record, fields::AVERAGE_WAGE, 0.0).max(0.0),
    }
}

/// Keep the records whose state name matches `selector`.
///
/// The sentinel "All" (or an empty selector) returns the whole set unchanged,
/// in order. Comparison is trimmed and case-insensitive; records without a
/// usable state name are dropped, not erred.
pub fn filter_by_state(records: &[RawRecord], selector: &str) -> Vec<RawRecord> {
    let selector = selector.trim();
    if selector.is_empty() || selector.eq_ignore_ascii_case(ALL_STATES) {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| {
            fields::resolve_name(record, fields::STATE_NAME)
                .is_some_and(|state| state.eq_ignore_ascii_case(selector))
        })
        .cloned()
        .collect()
}

/// Distinct state names present in the records, sorted, with "All" prepended.
pub fn list_states(records: &[RawRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter_map(|record| fields::resolve_name(record, fields::STATE_NAME))
        .collect();
    names.sort();
    names.dedup();

    let mut out = Vec::with_capacity(names.len() + 1);
    out.push(ALL_STATES.to_string());
    out.extend(names);
    out
}

/// Reduce a filtered record set into KPI sums and the average wage.
///
/// The average wage is the mean of the *non-zero* per-district wages:
/// districts reporting zero/missing wage are excluded from both numerator and
/// denominator rather than dragging the mean down. An empty input yields the
/// all-zero summary.
pub fn summarize(filtered: &[RawRecord]) -> SummaryStatistics {
    let mut summary = SummaryStatistics::default();
    let mut wage_sum = 0.0;
    let mut wage_count = 0usize;

    for record in filtered {
        let metrics = canonicalize(record);
        summary.total_workers += metrics.total_workers;
        summary.total_households += metrics.total_households;
        summary.total_expenditure += metrics.total_expenditure;
        summary.completed_works += metrics.completed_works;

        if metrics.average_wage_rate > 0.0 {
            wage_sum += metrics.average_wage_rate;
            wage_count += 1;
        }
    }

    if wage_count > 0 {
        summary.average_wage = wage_sum / wage_count as f64;
    }
    summary
}

/// Project the filtered set to `{district, wage}` pairs, ranked for the chart.
///
/// Descending by wage; the sort is stable, so equal wages keep their original
/// relative order. At most `n` entries are returned.
pub fn top_by_wage(filtered: &[RawRecord], n: usize) -> Vec<ChartEntry> {
    let mut entries: Vec<ChartEntry> = filtered
        .iter()
        .map(|record| ChartEntry {
            label: fields::resolve_name(record, fields::DISTRICT_NAME)
                .unwrap_or_else(|| fields::UNKNOWN_NAME.to_string()),
            value: fields::resolve_number(record, fields::AVERAGE_WAGE, 0.0),
        })
        .collect();
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().expect("test record must be an object").clone()
    }

    #[test]
    fn summarize_empty_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, SummaryStatistics::default());
        assert!(summary.average_wage == 0.0 && !summary.average_wage.is_nan());
    }

    #[test]
    fn average_wage_excludes_zero_entries() {
        let records = vec![
            record(json!({ "Average_Wage_rate_per_day_per_person": 0 })),
            record(json!({ "Average_Wage_rate_per_day_per_person": 100 })),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.average_wage, 100.0);
    }

    #[test]
    fn average_wage_zero_when_no_district_reports_one() {
        let records = vec![
            record(json!({ "Average_Wage_rate_per_day_per_person": 0 })),
            record(json!({ "Average_Wage_rate_per_day_per_person": "" })),
        ];
        assert_eq!(summarize(&records).average_wage, 0.0);
    }

    #[test]
    fn sums_accept_mixed_key_spellings() {
        let records = vec![
            record(json!({ "Total_No_of_Workers": "1,000", "Total_Exp": 10 })),
            record(json!({ "Total No of Workers": 250, "TotalExp": "5" })),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total_workers, 1250.0);
        assert_eq!(summary.total_expenditure, 15.0);
    }

    #[test]
    fn filter_all_returns_records_unchanged() {
        let records = vec![
            record(json!({ "State Name": "Bihar", "n": 1 })),
            record(json!({ "State Name": "Kerala", "n": 2 })),
        ];
        let filtered = filter_by_state(&records, ALL_STATES);
        assert_eq!(filtered, records);
    }

    #[test]
    fn filter_is_case_insensitive_on_state_name() {
        let records = vec![
            record(json!({ "State Name": "Bihar" })),
            record(json!({ "state_name": "Kerala" })),
        ];
        let filtered = filter_by_state(&records, "bihar");
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            crate::fields::resolve_name(&filtered[0], crate::fields::STATE_NAME).as_deref(),
            Some("Bihar")
        );
    }

    #[test]
    fn filter_drops_records_without_a_state_name() {
        let records = vec![
            record(json!({ "State Name": "Bihar" })),
            record(json!({ "n": 3 })),
        ];
        assert_eq!(filter_by_state(&records, "Bihar").len(), 1);
    }

    #[test]
    fn list_states_dedups_sorts_and_prepends_sentinel() {
        let records = vec![
            record(json!({ "State Name": "Kerala" })),
            record(json!({ "StateName": "Bihar" })),
            record(json!({ "state_name": " Kerala " })),
            record(json!({ "n": 1 })),
        ];
        assert_eq!(list_states(&records), vec!["All", "Bihar", "Kerala"]);
    }

    #[test]
    fn top_by_wage_ranks_descending_across_spellings() {
        // Mixed key spellings must still rank correctly.
        let records = vec![
            record(json!({ "District Name": "A", "Average_Wage_rate_per_day_per_person": "200" })),
            record(json!({ "DistrictName": "B", "AverageWageRatePerDay": "300" })),
        ];
        let chart = top_by_wage(&records, 12);
        assert_eq!(chart.len(), 2);
        assert_eq!((chart[0].label.as_str(), chart[0].value), ("B", 300.0));
        assert_eq!((chart[1].label.as_str(), chart[1].value), ("A", 200.0));
    }

    #[test]
    fn top_by_wage_truncates_and_is_stable_for_ties() {
        let records: Vec<RawRecord> = (0..5)
            .map(|i| {
                record(json!({
                    "district": format!("D{i}"),
                    "AverageWageRatePerDay": if i == 3 { 90 } else { 50 },
                }))
            })
            .collect();
        let chart = top_by_wage(&records, 3);
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[0].label, "D3");
        // Equal wages keep their original relative order.
        assert_eq!(chart[1].label, "D0");
        assert_eq!(chart[2].label, "D1");
    }

    #[test]
    fn top_by_wage_labels_unnamed_districts_unknown() {
        let records = vec![record(json!({ "AverageWageRatePerDay": 10 }))];
        assert_eq!(top_by_wage(&records, 12)[0].label, "Unknown");
    }

    #[test]
    fn canonicalize_clamps_negative_counts() {
        let metrics = canonicalize(&record(json!({
            "District Name": "A",
            "Total_No_of_Workers": -5,
        })));
        assert_eq!(metrics.total_workers, 0.0);
    }
}
