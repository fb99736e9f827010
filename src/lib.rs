//! map_search library: free-text location search for a map screen
//!
//! This library turns a place name typed into a search field into a map
//! [`Region`]: the text is trimmed, resolved through the Google Geocoding API,
//! and the first match becomes the new region (fixed 0.05° zoom), which the
//! map is told to animate to. Failures leave the current region untouched, and
//! responses to superseded searches are discarded.
//!
//! # Example
//!
//! ```no_run
//! use map_search::{Config, LocationSearchController, LoggingMapView};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_key: std::env::var("GOOGLE_MAPS_API_KEY")?,
//!     ..Default::default()
//! };
//!
//! let controller = LocationSearchController::from_config(&config, LoggingMapView)?;
//! if let Some(region) = controller.submit("Rio de Janeiro").await {
//!     println!("Now showing {}", region);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod controller;
pub mod error_handling;
pub mod geocode;
pub mod initialization;
pub mod map;
pub mod region;

// Re-export public API
pub use app::SessionReport;
pub use config::{Config, LogFormat, LogLevel, ResultSelection};
pub use controller::LocationSearchController;
pub use error_handling::{InitializationError, SearchError};
pub use geocode::{GeocodingClient, SearchQuery};
pub use map::{LoggingMapView, MapView};
pub use region::{Coordinate, Marker, Region};
pub use run::{run_session, SearchInput};

// Internal run module (wires the controller to the terminal)
mod run {
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio::io::BufReader;

    use crate::app::{print_search_statistics, run_lines, run_queries, SessionReport};
    use crate::config::Config;
    use crate::controller::LocationSearchController;
    use crate::map::LoggingMapView;

    /// Where searches come from.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SearchInput {
        /// Submitted one after the other, each waiting for the previous result
        Queries(Vec<String>),
        /// One submission per line of standard input, overlapping freely
        Stdin,
    }

    /// Runs a search session against the configured geocoding service.
    ///
    /// Ctrl-C shuts the controller down: in-flight searches are cancelled and
    /// the session ends with whatever region was last published.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API key is missing
    /// - The endpoint is not an absolute URL
    /// - The HTTP client cannot be built
    pub async fn run_session(config: Config, input: SearchInput) -> Result<SessionReport> {
        let controller = Arc::new(
            LocationSearchController::from_config(&config, LoggingMapView)
                .context("Failed to initialize location search")?,
        );
        info!(
            "Starting at {} (timeout {}s, retries {})",
            controller.current_region(),
            config.timeout.as_secs_f64(),
            config.max_retries
        );

        let interrupt = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => controller.shutdown(),
                    Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
                }
            })
        };

        let report = match input {
            SearchInput::Queries(queries) => run_queries(&controller, &queries).await,
            SearchInput::Stdin => {
                info!("Reading searches from stdin, one per line");
                run_lines(&controller, BufReader::new(tokio::io::stdin())).await
            }
        };

        interrupt.abort();
        print_search_statistics(&controller.stats());
        Ok(report)
    }
}
