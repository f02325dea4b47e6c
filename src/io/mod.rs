//! Output helpers.
//!
//! - district table export (CSV)
//! - summary export (JSON)

pub mod export;

pub use export::*;
