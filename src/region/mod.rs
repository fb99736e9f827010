//! Map regions and markers.
//!
//! A [`Region`] is the rectangular viewport handed to the map collaborator: a
//! center coordinate plus latitude/longitude spans. Regions are validated on
//! construction and replaced wholesale, never edited field by field.

mod types;

pub use types::{Coordinate, Marker, Region, RegionError};
