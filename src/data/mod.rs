//! Remote collaborators.
//!
//! - upstream performance API client (`api`)
//! - reverse geocoding of configured coordinates (`geo`)

pub mod api;
pub mod geo;

pub use api::*;
pub use geo::*;
