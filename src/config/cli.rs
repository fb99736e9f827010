//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::constants::{
    API_KEY_ENV_VAR, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    GEOCODE_ENDPOINT,
};
use crate::config::types::{Config, LogFormat, LogLevel, ResultSelection};

/// Command-line options and configuration.
///
/// Each positional query is submitted in order, as if typed into the search
/// field and confirmed. With `--stdin` (or when no query is given) every line
/// read from standard input is a submission.
///
/// # Examples
///
/// ```bash
/// # Single search, key from .env or environment
/// map_search "Rio de Janeiro"
///
/// # Interactive: one search per line
/// map_search --stdin --timeout-seconds 5
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "map_search",
    about = "Geocodes place names and recenters a map region on the first match."
)]
pub struct Opt {
    /// Place names to search for, in order
    pub queries: Vec<String>,

    /// Read one search per line from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Geocoding API credential
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Env file to read the credential from when neither `--api-key` nor the
    /// environment provides one
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Geocoding endpoint
    #[arg(long, default_value = GEOCODE_ENDPOINT)]
    pub endpoint: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Retries for transient network failures (0 keeps a single round trip)
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Map animation duration in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub animation_ms: u64,

    /// Candidate selection policy when several places match
    #[arg(long, value_enum, default_value_t = ResultSelection::First)]
    pub result_selection: ResultSelection,
}

impl Opt {
    /// Whether searches should be read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.stdin || self.queries.is_empty()
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            api_key: opt.api_key.unwrap_or_default(),
            endpoint: opt.endpoint,
            log_level: opt.log_level,
            log_format: opt.log_format,
            timeout: Duration::from_secs(opt.timeout_seconds),
            max_retries: opt.max_retries,
            user_agent: opt.user_agent,
            animation_duration: Duration::from_millis(opt.animation_ms),
            result_selection: opt.result_selection,
        }
    }
}
