//! Error type definitions.
//!
//! This module defines the search error, the initialization error, and the
//! categories used to count failures and notable events.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::geocode::GeocodeStatus;
use crate::region::RegionError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The geocoding endpoint is not an absolute URL.
    #[error("Invalid geocoding endpoint '{endpoint}': {source}")]
    EndpointError {
        /// The rejected endpoint string
        endpoint: String,
        /// Underlying parse failure
        source: url::ParseError,
    },

    /// No API credential was supplied.
    #[error("Missing API key: set {0} or pass --api-key")]
    MissingApiKeyError(&'static str),
}

/// Why a search did not produce a new current region.
///
/// None of these are fatal: the controller logs them, leaves the current
/// region untouched, and stays usable for the next search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Input was blank after trimming. Not a failure; nothing was requested.
    #[error("Search text is empty")]
    EmptyQuery,

    /// The service answered but without a usable candidate.
    #[error("No location found (status {status})")]
    NotFound {
        /// Status reported by the geocoding service
        status: GeocodeStatus,
        /// Optional explanation supplied by the service
        message: Option<String>,
    },

    /// The request could not be built from the endpoint and query.
    #[error("Invalid geocoding URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Network failure or non-success HTTP status.
    #[error("Geocoding request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The response body was not the expected JSON shape.
    #[error("Geocoding response could not be parsed: {0}")]
    Decode(#[from] serde_json::Error),

    /// No response within the configured timeout.
    #[error("Geocoding request timed out after {0:?}")]
    Timeout(Duration),

    /// The selected candidate does not describe a valid region.
    #[error("Geocoding result is not a valid region: {0}")]
    InvalidRegion(#[from] RegionError),

    /// A newer search was issued before this one completed.
    #[error("Search #{sequence} superseded by search #{latest}")]
    Superseded {
        /// Sequence number of this search
        sequence: u64,
        /// Latest sequence number issued when this search completed
        latest: u64,
    },

    /// The controller was shut down.
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Whether this outcome should be reported as a failure.
    ///
    /// Empty input and superseded responses are expected outcomes of normal
    /// use and are only logged at debug level.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            SearchError::EmptyQuery | SearchError::Superseded { .. } | SearchError::Cancelled
        )
    }
}

/// Types of errors that can occur during a search.
///
/// Every `SearchError` that is a failure maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Service-reported outcomes
    /// `OK` with no results, or `ZERO_RESULTS`
    GeocodeZeroResults,
    /// `OVER_DAILY_LIMIT` or `OVER_QUERY_LIMIT`
    GeocodeQuotaExceeded,
    /// `REQUEST_DENIED`
    GeocodeRequestDenied,
    /// `INVALID_REQUEST`
    GeocodeInvalidRequest,
    /// `UNKNOWN_ERROR` or an unrecognized status
    GeocodeServiceError,
    // HTTP/Network errors
    /// Request could not be built
    HttpRequestBuilderError,
    /// HTTP-level timeout
    HttpRequestTimeoutError,
    /// Connection failure
    HttpRequestConnectError,
    /// Body could not be read
    HttpRequestBodyError,
    /// Body could not be decoded by the HTTP stack
    HttpRequestDecodeError,
    /// HTTP 429
    HttpRequestTooManyRequests,
    /// Other 4xx
    HttpRequestClientError,
    /// 5xx
    HttpRequestServerError,
    /// Any other transport failure
    HttpRequestOtherError,
    // Local failures
    /// Request URL could not be built
    InvalidUrl,
    /// Body was not a geocoding response
    ResponseParseError,
    /// No answer within the timeout
    SearchTimeout,
    /// Candidate coordinate out of range
    InvalidRegion,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::GeocodeZeroResults => "No results",
            ErrorType::GeocodeQuotaExceeded => "Quota exceeded",
            ErrorType::GeocodeRequestDenied => "Request denied",
            ErrorType::GeocodeInvalidRequest => "Invalid request",
            ErrorType::GeocodeServiceError => "Geocoding service error",
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestClientError => "HTTP client error (4xx)",
            ErrorType::HttpRequestServerError => "HTTP server error (5xx)",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::InvalidUrl => "Invalid geocoding URL",
            ErrorType::ResponseParseError => "Response parse error",
            ErrorType::SearchTimeout => "Search timeout",
            ErrorType::InvalidRegion => "Invalid region",
        }
    }
}

/// Types of informational events during a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A search replaced the current region
    RegionPublished,
    /// Blank input was submitted
    EmptyQueryIgnored,
    /// A response arrived after a newer search was issued
    StaleResponseDiscarded,
    /// A search ended because the controller shut down
    SearchCancelled,
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InfoType::RegionPublished => "Region published",
            InfoType::EmptyQueryIgnored => "Empty query ignored",
            InfoType::StaleResponseDiscarded => "Stale response discarded",
            InfoType::SearchCancelled => "Search cancelled",
        };
        f.write_str(s)
    }
}
