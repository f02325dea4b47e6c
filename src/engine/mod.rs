//! Aggregation & normalization over raw district records.
//!
//! Everything here is a pure function of its inputs:
//!
//! - filtering and distinct-state extraction (`aggregate`)
//! - KPI summary + wage chart ranking (`aggregate`)
//! - per-1000-household rates (`rates`)
//! - fuzzy district matching for location detection (`locate`)
//!
//! The engine never errors on malformed input: numeric fields degrade to
//! their fallbacks, name fields to "Unknown", and an empty record set yields
//! well-defined zero-valued aggregates.

pub mod aggregate;
pub mod locate;
pub mod rates;

pub use aggregate::*;
pub use locate::*;
pub use rates::*;
