//! Domain records for the places catalog.
//!
//! Field names double as the on-disk and on-wire JSON keys.

pub mod place;

pub use place::{Place, Review};
