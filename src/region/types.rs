//! Region, coordinate, and marker types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    DEFAULT_LATITUDE, DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE, DEFAULT_LONGITUDE_DELTA,
    MARKER_DESCRIPTION, MARKER_TITLE,
};

/// Lower latitude bound
pub const MIN_LATITUDE: f64 = -90.0;
/// Upper latitude bound
pub const MAX_LATITUDE: f64 = 90.0;

/// Lower longitude bound
pub const MIN_LONGITUDE: f64 = -180.0;
/// Upper longitude bound
pub const MAX_LONGITUDE: f64 = 180.0;

/// Reasons a region cannot be published.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RegionError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Span is zero, negative, or not finite.
    #[error("{axis} delta {value} must be strictly positive")]
    NonPositiveDelta {
        /// Which span was rejected ("latitude" or "longitude")
        axis: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// A geographic point in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north (negative south)
    pub latitude: f64,
    /// Degrees east (negative west)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates an unvalidated coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks both components against their valid ranges.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !self.latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude) {
            return Err(RegionError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite()
            || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
        {
            return Err(RegionError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// The map viewport: a center coordinate and the visible spans.
///
/// Fields are private so that every `Region` in circulation has passed
/// validation; build one with [`Region::new`] or [`Region::around`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    latitude: f64,
    longitude: f64,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl Region {
    /// Creates a validated region.
    ///
    /// # Errors
    ///
    /// Returns a `RegionError` if the center is out of range or either span is
    /// not strictly positive.
    pub fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, RegionError> {
        Coordinate::new(latitude, longitude).validate()?;
        check_delta("latitude", latitude_delta)?;
        check_delta("longitude", longitude_delta)?;
        Ok(Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Creates a square-span region centered on `center`.
    pub fn around(center: Coordinate, delta: f64) -> Result<Self, RegionError> {
        Self::new(center.latitude, center.longitude, delta, delta)
    }

    /// Center latitude.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Center longitude.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Visible latitude span.
    pub fn latitude_delta(&self) -> f64 {
        self.latitude_delta
    }

    /// Visible longitude span.
    pub fn longitude_delta(&self) -> f64 {
        self.longitude_delta
    }

    /// Center of the region.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn check_delta(axis: &'static str, value: f64) -> Result<(), RegionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RegionError::NonPositiveDelta { axis, value })
    }
}

impl Default for Region {
    /// The fallback region shown before any search (São Paulo).
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) span {:.4}x{:.4}",
            self.center(),
            self.latitude_delta,
            self.longitude_delta
        )
    }
}

/// The single marker rendered at the current region's center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Center of the region the marker is drawn at
    pub coordinate: Coordinate,
    /// Marker title
    pub title: &'static str,
    /// Marker subtitle
    pub description: &'static str,
}

impl Marker {
    /// Marker for `region`, with the fixed title and description.
    pub fn at(region: &Region) -> Self {
        Self {
            coordinate: region.center(),
            title: MARKER_TITLE,
            description: MARKER_DESCRIPTION,
        }
    }
}
