//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `map_search` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use map_search::app::{load_dotenv, read_env_file_var};
use map_search::config::{Opt, API_KEY_ENV_VAR};
use map_search::initialization::init_logger_with;
use map_search::{run_session, Config, SearchInput};

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before parsing so clap sees GOOGLE_MAPS_API_KEY from .env
    load_dotenv();

    let mut opt = Opt::parse();
    if opt.api_key.is_none() {
        if let Some(path) = &opt.env_file {
            opt.api_key = read_env_file_var(path, API_KEY_ENV_VAR);
        }
    }

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let input = if opt.reads_stdin() {
        SearchInput::Stdin
    } else {
        SearchInput::Queries(opt.queries.clone())
    };
    let config = Config::from(opt);

    match run_session(config, input).await {
        Ok(report) => {
            println!(
                "Submitted {} search{} ({} applied); showing {}",
                report.submitted,
                if report.submitted == 1 { "" } else { "es" },
                report.applied,
                report.final_region
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("map_search error: {:#}", e);
            process::exit(1);
        }
    }
}
