//! Tolerant field access for heterogeneously-keyed records.
//!
//! Government data exports rename columns between snake_case, spaced, and
//! camel-case forms from one response to the next. Each logical field
//! therefore carries an ordered alias chain, and resolution returns the first
//! present, non-empty, coercible spelling.
//!
//! Design goals:
//! - **Data-driven**: the alias policy lives in constants, not in call sites
//! - **Total**: resolution never fails; callers supply the fallback
//! - **Pure**: no side effects, trivially unit-testable

use serde_json::Value;

use crate::domain::RawRecord;

pub const STATE_NAME: &[&str] = &["State Name", "StateName", "state_name"];
pub const DISTRICT_NAME: &[&str] = &["District Name", "DistrictName", "district_name", "district"];
pub const TOTAL_WORKERS: &[&str] = &["Total_No_of_Workers", "Total No of Workers", "TotalWorkers"];
pub const ACTIVE_WORKERS: &[&str] = &[
    "Total_No_of_Active_Workers",
    "Total No of Active Workers",
    "ActiveWorkers",
];
pub const HOUSEHOLDS_WORKED: &[&str] = &[
    "Total_Households_Worked",
    "Total Households Worked",
    "TotalHouseholdsWorked",
];
pub const TOTAL_EXPENDITURE: &[&str] = &["Total_Exp", "Total Exp", "TotalExp"];
pub const ONGOING_WORKS: &[&str] = &[
    "Number_of_Ongoing_Works",
    "Number of Ongoing Works",
    "OngoingWorks",
];
pub const COMPLETED_WORKS: &[&str] = &[
    "Number_of_Completed_Works",
    "Number of Completed Works",
    "CompletedWorks",
];
pub const AVERAGE_WAGE: &[&str] = &[
    "Average_Wage_rate_per_day_per_person",
    "Average Wage Rate Per Day Per Person",
    "AverageWageRatePerDay",
];

/// Display fallback for records that carry no usable name field.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Resolve a numeric field through an alias chain.
///
/// Aliases are tried in priority order. The first one whose value is present
/// (not absent, not null, not empty-string) and numerically coercible wins,
/// and later aliases are not consulted — a present value of exactly `0` is a
/// valid match. A present but uncoercible value falls through to the next
/// alias; if nothing coerces, `fallback` is returned.
pub fn resolve_number(record: &RawRecord, aliases: &[&str], fallback: f64) -> f64 {
    for &key in aliases {
        let Some(value) = record.get(key) else {
            continue;
        };
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    if v.is_finite() {
                        return v;
                    }
                }
            }
            Value::String(s) => {
                if let Some(v) = parse_numeric(s) {
                    return v;
                }
            }
            // null models "missing"; bools/arrays/objects never coerce
            _ => {}
        }
    }
    fallback
}

/// Resolve a display-name field through an alias chain.
///
/// Returns the first present, non-empty (after trimming) string-like value.
pub fn resolve_name(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    for &key in aliases {
        match record.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Parse a numeric string, accepting the thousands separators the upstream
/// exports use (e.g. `"1,23,456"`).
fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace(',', "");
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().expect("test record must be an object").clone()
    }

    #[test]
    fn first_present_alias_wins() {
        let r = record(json!({
            "Total_Exp": "100",
            "TotalExp": "999",
        }));
        let v = resolve_number(&r, TOTAL_EXPENDITURE, 0.0);
        assert_eq!(v, 100.0);
    }

    #[test]
    fn present_zero_is_a_valid_match() {
        let r = record(json!({
            "Total_Exp": 0,
            "TotalExp": 42,
        }));
        let v = resolve_number(&r, TOTAL_EXPENDITURE, 7.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn absent_null_and_empty_fall_through() {
        let r = record(json!({
            "Total_Exp": null,
            "Total Exp": "",
            "TotalExp": "55",
        }));
        let v = resolve_number(&r, TOTAL_EXPENDITURE, 0.0);
        assert_eq!(v, 55.0);
    }

    #[test]
    fn uncoercible_value_falls_through_to_later_alias() {
        let r = record(json!({
            "Total_Exp": "n/a",
            "TotalExp": "12.5",
        }));
        let v = resolve_number(&r, TOTAL_EXPENDITURE, 0.0);
        assert_eq!(v, 12.5);
    }

    #[test]
    fn fallback_when_nothing_coerces() {
        let r = record(json!({ "Total_Exp": "pending" }));
        let v = resolve_number(&r, TOTAL_EXPENDITURE, -1.0);
        assert_eq!(v, -1.0);
    }

    #[test]
    fn numeric_strings_accept_thousands_separators() {
        let r = record(json!({ "Total_Households_Worked": "1,23,456" }));
        let v = resolve_number(&r, HOUSEHOLDS_WORKED, 0.0);
        assert_eq!(v, 123_456.0);
    }

    #[test]
    fn name_resolution_trims_and_skips_empty() {
        let r = record(json!({
            "District Name": "  ",
            "district_name": "  Bansur ",
        }));
        assert_eq!(resolve_name(&r, DISTRICT_NAME).as_deref(), Some("Bansur"));
        assert_eq!(resolve_name(&record(json!({})), DISTRICT_NAME), None);
    }
}
