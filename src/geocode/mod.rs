//! Geocoding: resolving free text to a coordinate.
//!
//! This module provides:
//! - `SearchQuery`: trimmed, non-empty user input
//! - Request URL construction (`address` and `key` query parameters)
//! - The response model and the first-candidate selection policy
//! - `GeocodingClient`, the HTTP round trip

mod client;
mod query;
mod request;
mod response;

// Re-export public API
pub use client::GeocodingClient;
pub use query::SearchQuery;
pub use request::{build_geocode_url, redact_key};
pub use response::{
    select_candidate, GeocodeResponse, GeocodeResult, GeocodeStatus, Geometry, LatLng,
};
