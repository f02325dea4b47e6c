//! Per-1000-household normalization for the rates view.

use crate::domain::{NormalizedRecord, RawRecord};
use crate::engine::canonicalize;
use crate::fields;

/// Normalize every record independently (no state filtering — the rates view
/// manages its own district selection).
pub fn normalize_all(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}

/// Compute `(count / households) × 1000` rates for one record.
///
/// The household denominator is floored to 1: a district reporting zero or no
/// households yields finite rates (the scaled raw counts) rather than
/// infinity or a silently-zeroed row.
pub fn normalize_record(record: &RawRecord) -> NormalizedRecord {
    let metrics = canonicalize(record);
    let active_workers = fields::resolve_number(record, fields::ACTIVE_WORKERS, 0.0).max(0.0);
    let ongoing_works = fields::resolve_number(record, fields::ONGOING_WORKS, 0.0).max(0.0);
    let denominator = metrics.total_households.max(1.0);

    NormalizedRecord {
        active_per_1000hh: active_workers / denominator * 1000.0,
        ongoing_per_1000hh: ongoing_works / denominator * 1000.0,
        completed_per_1000hh: metrics.completed_works / denominator * 1000.0,
        active_workers,
        ongoing_works,
        metrics,
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
    fn rates_scale_counts_per_1000_households() {
        let r = record(json!({
            "Total_Households_Worked": 2000,
            "Total_No_of_Active_Workers": 500,
            "Number_of_Ongoing_Works": 40,
            "Number_of_Completed_Works": 10,
        }));
        let n = normalize_record(&r);
        assert_eq!(n.active_per_1000hh, 250.0);
        assert_eq!(n.ongoing_per_1000hh, 20.0);
        assert_eq!(n.completed_per_1000hh, 5.0);
    }

    #[test]
    fn zero_households_floors_denominator_never_divides_by_zero() {
        let r = record(json!({
            "Total_Households_Worked": 0,
            "Total_No_of_Active_Workers": 5,
        }));
        let n = normalize_record(&r);
        // denominator floors to 1, so the rate is the scaled raw count
        assert_eq!(n.active_per_1000hh, 5000.0);
        assert!(n.active_per_1000hh.is_finite());
        // the canonical household count keeps the reported zero
        assert_eq!(n.metrics.total_households, 0.0);
    }

    #[test]
    fn missing_households_behaves_like_zero() {
        let r = record(json!({ "Number_of_Completed_Works": 3 }));
        let n = normalize_record(&r);
        assert_eq!(n.completed_per_1000hh, 3000.0);
    }

    #[test]
    fn normalize_all_covers_every_record_in_order() {
        let records = vec![
            record(json!({ "district": "A", "Total_Households_Worked": 100 })),
            record(json!({ "district": "B", "Total_Households_Worked": 200 })),
        ];
        let normalized = normalize_all(&records);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].metrics.district_name, "A");
        assert_eq!(normalized[1].metrics.district_name, "B");
    }
}
