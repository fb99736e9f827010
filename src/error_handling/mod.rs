//! Error handling and search statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Search statistics tracking (errors and info events)
//! - Retry strategy configuration
//!
//! Outcomes are categorized into:
//! - **Errors**: Failures that left the current region unchanged
//! - **Info**: Expected events (published region, blank input, stale response)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_geocode_status, categorize_reqwest_error, get_retry_strategy, is_retriable_error,
    search_budget, update_search_stats,
};
pub use stats::SearchStats;
pub use types::{ErrorType, InfoType, InitializationError, SearchError};
