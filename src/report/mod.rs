//! Formatted terminal output: KPI summary, district and rates tables.

pub mod format;

pub use format::*;
