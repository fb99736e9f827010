//! Configuration types.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    ANIMATION_DURATION, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    GEOCODE_ENDPOINT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which geocoding candidate becomes the new region when several match.
///
/// Only `First` exists: the service's own ranking is trusted and no attempt is
/// made to guess the user's intent among multiple matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ResultSelection {
    /// Take the first candidate returned by the service
    #[default]
    First,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use map_search::Config;
///
/// let config = Config {
///     api_key: "my-key".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Geocoding API credential
    pub api_key: String,

    /// Geocoding endpoint (address and key are appended as query parameters)
    pub endpoint: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Upper bound on a single geocoding round trip
    pub timeout: Duration,

    /// Retries for transient transport failures (0 = single round trip)
    pub max_retries: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Duration of the animation to a newly published region
    pub animation_duration: Duration,

    /// Candidate selection policy
    pub result_selection: ResultSelection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: GEOCODE_ENDPOINT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            animation_duration: ANIMATION_DURATION,
            result_selection: ResultSelection::First,
        }
    }
}
