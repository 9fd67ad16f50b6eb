//! Monthly Wrap Backend Library
//!
//! This library implements the backend for the Monthly Wrap frontend. It performs
//! the Spotify OAuth 2.0 authorization-code flow on behalf of a browser session and
//! proxies two read-only listening-history queries to the authenticated frontend.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints, session cookie extraction and the router
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and its HTTP rendering
//! - `management` - Session storage and access token lifecycle
//! - `server` - HTTP server bootstrap and graceful shutdown
//! - `spotify` - Spotify accounts and Web API client
//! - `telemetry` - Tracing subscriber setup
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use monthlywrap::{api::AppState, config, management::MemoryStore, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     config::load_env()?;
//!     let config = config::Config::load()?;
//!     let state = AppState::new(config, std::sync::Arc::new(MemoryStore::new()));
//!     server::start_api_server(state).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod telemetry;
pub mod types;
pub mod utils;

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used during startup, before
/// the tracing subscriber is installed, for errors that make serving impossible.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used during startup for notices that don't prevent the server from running,
/// such as a missing `.env` file.
///
/// # Example
///
/// ```
/// warning!("No .env file found, relying on process environment");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
