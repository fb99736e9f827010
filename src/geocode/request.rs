//! Geocoding request URL construction.

use url::Url;

use super::query::SearchQuery;
use crate::config::{ADDRESS_PARAM, KEY_PARAM};

/// Builds the geocoding GET URL for `query`.
///
/// The address and credential are appended as form-encoded query parameters,
/// after any parameters already present on `endpoint`.
///
/// # Errors
///
/// Returns `url::ParseError` if `endpoint` is not an absolute URL.
pub fn build_geocode_url(
    endpoint: &str,
    query: &SearchQuery,
    api_key: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair(ADDRESS_PARAM, query.as_str())
        .append_pair(KEY_PARAM, api_key);
    Ok(url)
}

/// Returns `url` with the credential value masked, for logging.
pub fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
