//! Place registry: the authoritative ordered list of places.
//!
//! A place's id is its current index in the list. Deleting a place shifts
//! the id of every place after it down by one.

pub mod id;
pub mod registry;
pub mod store;

pub use id::parse_place_id;
pub use registry::PlaceRegistry;
pub use store::PlaceCatalog;
