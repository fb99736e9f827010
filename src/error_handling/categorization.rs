//! Error categorization and retry strategy.
//!
//! This module maps search failures onto `ErrorType` counters and decides
//! which transport failures are worth another attempt.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::stats::SearchStats;
use super::types::{ErrorType, InfoType, SearchError};
use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;
use crate::geocode::GeocodeStatus;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `max_retries` delays, one per retry after the first attempt
///
/// With `max_retries == 0` the strategy is empty and the request is sent once.
pub fn get_retry_strategy(max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(max_retries)
}

/// Upper bound on a whole search: every attempt at `attempt_timeout` plus
/// every backoff delay between attempts.
pub fn search_budget(attempt_timeout: Duration, max_retries: usize) -> Duration {
    let attempts = u32::try_from(max_retries.saturating_add(1)).unwrap_or(u32::MAX);
    let backoff: Duration = get_retry_strategy(max_retries).sum();
    attempt_timeout.saturating_mul(attempts).saturating_add(backoff)
}

/// Determines if a search error is worth retrying.
///
/// Only transient transport conditions qualify: attempts that timed out,
/// connection failures, 429, and 5xx responses. Service-reported statuses are retried
/// only for `OVER_QUERY_LIMIT` and `UNKNOWN_ERROR`, which the service documents
/// as transient. Everything else (denied key, parse failure, bad URL) would
/// fail identically on the next attempt.
pub fn is_retriable_error(error: &SearchError) -> bool {
    match error {
        SearchError::Transport(e) => {
            if let Some(status) = e.status() {
                return status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS
                    || status.is_server_error();
            }
            e.is_connect() || e.is_request()
        }
        SearchError::Timeout(_) => true,
        SearchError::NotFound { status, .. } => matches!(
            status,
            GeocodeStatus::OverQueryLimit | GeocodeStatus::UnknownError
        ),
        _ => false,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    // Check HTTP status codes first
    if let Some(status) = error.status() {
        if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
            return ErrorType::HttpRequestTooManyRequests;
        }
        if status.is_client_error() {
            return ErrorType::HttpRequestClientError;
        }
        if status.is_server_error() {
            return ErrorType::HttpRequestServerError;
        }
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Maps a service status that is not `OK` onto an `ErrorType`.
pub fn categorize_geocode_status(status: GeocodeStatus) -> ErrorType {
    match status {
        GeocodeStatus::ZeroResults | GeocodeStatus::Ok => ErrorType::GeocodeZeroResults,
        GeocodeStatus::OverDailyLimit | GeocodeStatus::OverQueryLimit => {
            ErrorType::GeocodeQuotaExceeded
        }
        GeocodeStatus::RequestDenied => ErrorType::GeocodeRequestDenied,
        GeocodeStatus::InvalidRequest => ErrorType::GeocodeInvalidRequest,
        GeocodeStatus::UnknownError | GeocodeStatus::Unknown => ErrorType::GeocodeServiceError,
    }
}

/// Records a search outcome in the statistics.
///
/// Failures are counted under their `ErrorType`; expected outcomes (empty
/// input, stale responses, cancellation) are counted as info.
pub fn update_search_stats(stats: &SearchStats, error: &SearchError) {
    match error {
        SearchError::EmptyQuery => stats.increment_info(InfoType::EmptyQueryIgnored),
        SearchError::Superseded { .. } => stats.increment_info(InfoType::StaleResponseDiscarded),
        SearchError::Cancelled => stats.increment_info(InfoType::SearchCancelled),
        SearchError::NotFound { status, .. } => {
            stats.increment_error(categorize_geocode_status(*status))
        }
        SearchError::Transport(e) => stats.increment_error(categorize_reqwest_error(e)),
        SearchError::InvalidUrl(_) => stats.increment_error(ErrorType::InvalidUrl),
        SearchError::Decode(_) => stats.increment_error(ErrorType::ResponseParseError),
        SearchError::Timeout(_) => stats.increment_error(ErrorType::SearchTimeout),
        SearchError::InvalidRegion(_) => stats.increment_error(ErrorType::InvalidRegion),
    }
}
