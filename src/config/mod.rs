//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default region, zoom span, timeouts, endpoint)
//! - The library `Config` struct
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ResultSelection};
