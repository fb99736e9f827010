//! Geocoding response model and candidate selection.
//!
//! Only the fields this crate consumes are modeled; everything else in the
//! service's JSON is ignored by serde.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ResultSelection;
use crate::error_handling::SearchError;
use crate::region::Coordinate;

/// Top-level status reported by the geocoding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeocodeStatus {
    /// At least one result was returned
    Ok,
    /// The address was understood but matched nothing
    ZeroResults,
    /// Billing or daily quota problem on the key
    OverDailyLimit,
    /// Request rate exceeded
    OverQueryLimit,
    /// The key was rejected
    RequestDenied,
    /// The `address` parameter was missing or malformed
    InvalidRequest,
    /// Server-side failure; a retry may succeed
    UnknownError,
    /// Any status string this crate does not recognize.
    #[serde(other)]
    Unknown,
}

impl GeocodeStatus {
    /// The status string as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocodeStatus::Ok => "OK",
            GeocodeStatus::ZeroResults => "ZERO_RESULTS",
            GeocodeStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            GeocodeStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            GeocodeStatus::RequestDenied => "REQUEST_DENIED",
            GeocodeStatus::InvalidRequest => "INVALID_REQUEST",
            GeocodeStatus::UnknownError => "UNKNOWN_ERROR",
            GeocodeStatus::Unknown => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ lat, lng }` as sent by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(location: LatLng) -> Self {
        Coordinate::new(location.lat, location.lng)
    }
}

/// Candidate geometry; only the point location is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Resolved point
    pub location: LatLng,
}

/// One candidate match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Where the candidate is
    pub geometry: Geometry,
    /// Human-readable address, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

impl GeocodeResult {
    /// The candidate's point as a `Coordinate`.
    pub fn coordinate(&self) -> Coordinate {
        self.geometry.location.into()
    }
}

/// The decoded response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Outcome reported by the service
    pub status: GeocodeStatus,
    /// Candidates, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Explanation accompanying non-OK statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Picks the candidate that becomes the new region.
///
/// Success requires `status == OK` and at least one result. Anything else is
/// `SearchError::NotFound` carrying the reported status.
pub fn select_candidate(
    response: &GeocodeResponse,
    selection: ResultSelection,
) -> Result<&GeocodeResult, SearchError> {
    if response.status != GeocodeStatus::Ok {
        return Err(SearchError::NotFound {
            status: response.status,
            message: response.error_message.clone(),
        });
    }

    let candidate = match selection {
        ResultSelection::First => response.results.first(),
    };

    candidate.ok_or(SearchError::NotFound {
        status: GeocodeStatus::ZeroResults,
        message: Some("status OK with an empty result list".to_string()),
    })
}
