//! Search-and-recenter controller.
//!
//! [`LocationSearchController`] owns the current [`Region`]. Each search trims
//! the input, geocodes it, and, if it is still the most recent search when the
//! response arrives, replaces the region and tells the map to animate there.
//!
//! # State
//!
//! The region lives in a `tokio::sync::watch` channel: the controller is the
//! only writer, and UI layers call [`subscribe`](LocationSearchController::subscribe)
//! to observe replacements. Failures never touch it.
//!
//! # Ordering
//!
//! Every search gets an increasing sequence number when it is issued. A
//! response is applied only if its sequence number is still the latest one
//! issued; older responses are discarded with `SearchError::Superseded`,
//! whatever order they arrive in.
//!
//! # Timeout and cancellation
//!
//! Each attempt is bounded by `Config::timeout`; the whole search, retries
//! and backoff included, by `search_budget`. [`shutdown`](LocationSearchController::shutdown)
//! cancels in-flight searches and rejects new ones, for use when the screen
//! is torn down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ResultSelection, SEARCH_REGION_DELTA};
use crate::error_handling::{
    search_budget, update_search_stats, InfoType, InitializationError, SearchError, SearchStats,
};
use crate::geocode::{select_candidate, GeocodingClient, SearchQuery};
use crate::initialization::init_client;
use crate::map::MapView;
use crate::region::{Marker, Region};

/// Turns free-text searches into published map regions.
pub struct LocationSearchController<M: MapView> {
    client: GeocodingClient,
    map: M,
    state: watch::Sender<Region>,
    issued: AtomicU64,
    cancel: CancellationToken,
    stats: Arc<SearchStats>,
    timeout: Duration,
    animation_duration: Duration,
    result_selection: ResultSelection,
}

impl<M: MapView> LocationSearchController<M> {
    /// Creates a controller showing the default region.
    pub fn new(client: GeocodingClient, map: M, config: &Config) -> Self {
        Self::with_region(client, map, config, Region::default())
    }

    /// Creates a controller showing `initial` until the first successful search.
    pub fn with_region(client: GeocodingClient, map: M, config: &Config, initial: Region) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            client,
            map,
            state,
            issued: AtomicU64::new(0),
            cancel: CancellationToken::new(),
            stats: Arc::new(SearchStats::new()),
            timeout: search_budget(config.timeout, config.max_retries),
            animation_duration: config.animation_duration,
            result_selection: config.result_selection,
        }
    }

    /// Builds the HTTP client and geocoding client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client cannot be built, the
    /// API key is missing, or the endpoint is not an absolute URL.
    pub fn from_config(config: &Config, map: M) -> Result<Self, InitializationError> {
        let http = init_client(config)?;
        let client = GeocodingClient::new(http, config)?;
        Ok(Self::new(client, map, config))
    }

    /// The region currently shown.
    pub fn current_region(&self) -> Region {
        *self.state.borrow()
    }

    /// Observes region replacements. The receiver starts at the current region.
    pub fn subscribe(&self) -> watch::Receiver<Region> {
        self.state.subscribe()
    }

    /// The marker drawn at the current region.
    pub fn marker(&self) -> Marker {
        Marker::at(&self.state.borrow())
    }

    /// Counters for every search outcome.
    pub fn stats(&self) -> Arc<SearchStats> {
        Arc::clone(&self.stats)
    }

    /// Sequence number of the most recently issued search (0 before any).
    pub fn latest_sequence(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Cancels in-flight searches and rejects later ones.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            info!("Shutting down location search");
        }
        self.cancel.cancel();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A token that is cancelled when [`shutdown`](Self::shutdown) is called.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Searches for `raw_text` and recenters the map on the first match.
    ///
    /// On success the returned region has already been published and the map
    /// instructed to animate to it. On any error the current region is left
    /// exactly as it was; the error is logged and counted before returning.
    ///
    /// # Errors
    ///
    /// - `SearchError::EmptyQuery` if the text is blank (no request is sent)
    /// - `SearchError::NotFound` if the service has no usable candidate
    /// - `SearchError::Transport`, `Decode`, `InvalidUrl`, `Timeout` on
    ///   request failure
    /// - `SearchError::InvalidRegion` if the candidate is out of range
    /// - `SearchError::Superseded` if a newer search was issued meanwhile
    /// - `SearchError::Cancelled` after [`shutdown`](Self::shutdown)
    pub async fn search(&self, raw_text: &str) -> Result<Region, SearchError> {
        let result = self.run_search(raw_text).await;
        if let Err(ref error) = result {
            log_search_error(raw_text.trim(), error);
            update_search_stats(&self.stats, error);
        }
        result
    }

    /// UI entry point: like [`search`](Self::search) but absorbs every failure.
    ///
    /// Returns the newly published region, or `None` if the region did not
    /// change.
    pub async fn submit(&self, raw_text: &str) -> Option<Region> {
        self.search(raw_text).await.ok()
    }

    async fn run_search(&self, raw_text: &str) -> Result<Region, SearchError> {
        let query = SearchQuery::parse(raw_text).ok_or(SearchError::EmptyQuery)?;
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Search #{} for '{}'", sequence, query);

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(SearchError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, self.client.geocode(&query)) => {
                outcome.map_err(|_| SearchError::Timeout(self.timeout))??
            }
        };

        let candidate = select_candidate(&response, self.result_selection)?;
        let region = Region::around(candidate.coordinate(), SEARCH_REGION_DELTA)?;
        if let Some(address) = &candidate.formatted_address {
            debug!("Search #{} resolved to '{}'", sequence, address);
        }

        self.publish(sequence, region)
    }

    fn publish(&self, sequence: u64, region: Region) -> Result<Region, SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        // The sequence check runs under the watch lock so that a newer search
        // cannot publish between the check and the write.
        let mut latest = sequence;
        let published = self.state.send_if_modified(|current| {
            latest = self.issued.load(Ordering::SeqCst);
            if latest == sequence {
                *current = region;
                true
            } else {
                false
            }
        });
        if !published {
            return Err(SearchError::Superseded { sequence, latest });
        }

        self.map.animate_to_region(&region, self.animation_duration);
        self.stats.increment_info(InfoType::RegionPublished);
        info!("Search #{} recentered map at {}", sequence, region);
        Ok(region)
    }
}

fn log_search_error(text: &str, error: &SearchError) {
    if !error.is_failure() {
        debug!("Search for '{}' not applied: {}", text, error);
        return;
    }
    match error {
        SearchError::NotFound {
            message: Some(message),
            ..
        } => warn!("Location not found for '{}': {} ({})", text, error, message),
        SearchError::NotFound { .. } => warn!("Location not found for '{}': {}", text, error),
        _ => warn!("Error searching for location '{}': {}", text, error),
    }
}

#[cfg(test)]
mod tests;
