//! Configuration constants.
//!
//! This module defines the fixed values used throughout the application:
//! the fallback region shown before any search, the zoom span applied to
//! search results, timeouts, and the geocoding endpoint.

use std::time::Duration;

// Geocoding service
/// Google Geocoding JSON endpoint.
///
/// The address and credential are appended as `address` and `key` query
/// parameters. Overridable via `--endpoint` (used by tests to point at a mock).
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Environment variable holding the geocoding API credential.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Query parameter carrying the free-text address.
pub const ADDRESS_PARAM: &str = "address";
/// Query parameter carrying the API credential.
pub const KEY_PARAM: &str = "key";

// Default region ("no search yet")
/// Latitude of the fallback region center (São Paulo).
pub const DEFAULT_LATITUDE: f64 = -23.55052;
/// Longitude of the fallback region center (São Paulo).
pub const DEFAULT_LONGITUDE: f64 = -46.633308;
/// Latitude span of the fallback region.
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
/// Longitude span of the fallback region.
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

// Search result region
/// Span applied to both axes of a region built from a search result.
///
/// Independent of place type: a country gets the same zoom as a street address.
pub const SEARCH_REGION_DELTA: f64 = 0.05;

/// Duration of the map animation to a newly published region.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);

// Network
/// Per-request timeout in seconds.
///
/// Bounds the single geocoding round trip; the controller reports
/// `SearchError::Timeout` when it elapses.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent with geocoding requests.
pub const DEFAULT_USER_AGENT: &str = concat!("map_search/", env!("CARGO_PKG_VERSION"));

// Retry strategy
/// Number of retries after the first attempt. Zero keeps a single round trip.
pub const DEFAULT_MAX_RETRIES: usize = 0;
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;

// Marker shown at the current region
/// Fixed marker title.
pub const MARKER_TITLE: &str = "Current location";
/// Fixed marker description.
pub const MARKER_DESCRIPTION: &str = "Centered by search or default (São Paulo)";

// HTTP status codes (for clarity and consistency)
/// Rate-limit status, retried like a 5xx
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
