//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - raw upstream observations (`RawRecord`)
//! - the canonical per-district shape derived from them (`CanonicalMetrics`)
//! - aggregates and projections (`SummaryStatistics`, `ChartEntry`,
//!   `NormalizedRecord`)
//! - run configuration (`DashConfig`)

pub mod types;

pub use types::*;
