//! Main application modules.
//!
//! This module provides `.env` loading, the terminal search session, and
//! statistics printing used by the binary.

pub mod env;
pub mod session;
pub mod statistics;

// Re-export public API
pub use env::{load_dotenv, read_env_file_var};
pub use session::{run_lines, run_queries, SessionReport};
pub use statistics::print_search_statistics;
