//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for geocoding requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Per-request timeout from the config (each retry gets a fresh one)
/// - TCP connect timeout of `TCP_CONNECT_TIMEOUT_SECS`, capped by the overall timeout
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let connect_timeout = config
        .timeout
        .min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));
    let client = ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
