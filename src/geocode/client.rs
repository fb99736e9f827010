//! HTTP client for the geocoding service.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio_retry::RetryIf;
use url::Url;

use super::query::SearchQuery;
use super::request::{build_geocode_url, redact_key};
use super::response::{GeocodeResponse, GeocodeStatus};
use crate::config::{Config, API_KEY_ENV_VAR};
use crate::error_handling::{get_retry_strategy, is_retriable_error, InitializationError, SearchError};

/// Issues geocoding requests against a configured endpoint.
///
/// Holds the shared `reqwest::Client`, the endpoint, and the credential. One
/// call to [`geocode`](Self::geocode) is one round trip unless retries are
/// configured.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Arc<reqwest::Client>,
    endpoint: String,
    api_key: String,
    timeout: Duration,
    max_retries: usize,
}

impl GeocodingClient {
    /// Creates a client from the HTTP client and configuration.
    ///
    /// # Errors
    ///
    /// - `InitializationError::MissingApiKeyError` if `config.api_key` is blank
    /// - `InitializationError::EndpointError` if `config.endpoint` is not an
    ///   absolute URL
    pub fn new(http: Arc<reqwest::Client>, config: &Config) -> Result<Self, InitializationError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(InitializationError::MissingApiKeyError(API_KEY_ENV_VAR));
        }
        Url::parse(&config.endpoint).map_err(|source| InitializationError::EndpointError {
            endpoint: config.endpoint.clone(),
            source,
        })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
            timeout: config.timeout,
            max_retries: config.max_retries,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Geocodes `query`.
    ///
    /// Returns the decoded response whatever its `status`, except for the
    /// transient statuses `OVER_QUERY_LIMIT` and `UNKNOWN_ERROR`, which surface
    /// as `SearchError::NotFound` so that they can be retried.
    ///
    /// Each attempt is bounded by `Config::timeout` on its own, so a slow
    /// attempt can be retried when retries are configured.
    ///
    /// # Errors
    ///
    /// - `SearchError::InvalidUrl` if the request URL cannot be built
    /// - `SearchError::Timeout` if the last attempt exceeded the timeout
    /// - `SearchError::Transport` on network failure or a non-2xx HTTP status
    /// - `SearchError::Decode` if the body is not a geocoding response
    pub async fn geocode(&self, query: &SearchQuery) -> Result<GeocodeResponse, SearchError> {
        let url = build_geocode_url(&self.endpoint, query, &self.api_key)?;
        let strategy = get_retry_strategy(self.max_retries);

        RetryIf::spawn(
            strategy,
            || self.fetch_once(url.clone()),
            |error: &SearchError| {
                let retry = is_retriable_error(error);
                if retry {
                    warn!("Retrying geocoding request for '{}': {}", query, error);
                }
                retry
            },
        )
        .await
    }

    async fn fetch_once(&self, url: Url) -> Result<GeocodeResponse, SearchError> {
        debug!("GET {}", redact_key(&url));

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?
            .error_for_status()?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let decoded: GeocodeResponse = serde_json::from_slice(&body)?;

        debug!(
            "Geocoding status {} with {} result(s)",
            decoded.status,
            decoded.results.len()
        );

        match decoded.status {
            GeocodeStatus::OverQueryLimit | GeocodeStatus::UnknownError => {
                Err(SearchError::NotFound {
                    status: decoded.status,
                    message: decoded.error_message,
                })
            }
            _ => Ok(decoded),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> SearchError {
        if error.is_timeout() {
            SearchError::Timeout(self.timeout)
        } else {
            SearchError::Transport(error)
        }
    }
}
