//! Configuration management for the Monthly Wrap backend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! session signing key.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use clap::{Args, Parser, ValueEnum};

/// Loads environment variables from a `.env` file in the working directory.
///
/// Variables already present in the process environment are not overwritten.
/// A missing file is not an error: deployments usually inject configuration
/// directly into the environment.
///
/// # Returns
///
/// Returns `Ok(true)` if a `.env` file was loaded, `Ok(false)` if none exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
///
/// # Example
///
/// ```
/// use monthlywrap::config;
///
/// if let Err(e) = config::load_env() {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub fn load_env() -> Result<bool, dotenv::Error> {
    match dotenv::dotenv() {
        Ok(_) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub spotify: SpotifyConfig,

    #[command(flatten)]
    pub session: SessionConfig,
}

impl Config {
    /// Parses configuration from command-line flags and the environment.
    ///
    /// # Errors
    ///
    /// Returns clap's error when a required value is missing or a value does
    /// not parse. `--help` and `--version` also come back as errors; callers
    /// should let those print through [`clap::Error::exit`].
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Like [`Config::load`], with explicit arguments instead of `std::env::args`.
    pub fn load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Origin of the web frontend; callback redirects here and CORS allows it
    #[arg(long, env = "FRONTEND_ORIGIN", default_value = "http://localhost:3000")]
    pub frontend_origin: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct SpotifyConfig {
    /// Client ID of the registered Spotify application
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: String,

    /// Client secret of the registered Spotify application
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Redirect URI registered with Spotify; must point at this server's /callback
    #[arg(
        long,
        env = "SPOTIFY_REDIRECT_URI",
        default_value = "http://localhost:8080/callback"
    )]
    pub redirect_uri: String,

    /// Space-separated scopes requested during authorization
    #[arg(
        long,
        env = "SPOTIFY_SCOPE",
        default_value = "user-read-recently-played user-top-read"
    )]
    pub scope: String,

    /// Base URL of the Spotify accounts service (authorize and token endpoints)
    #[arg(long, env = "SPOTIFY_ACCOUNTS_URL", default_value = "https://accounts.spotify.com")]
    pub accounts_url: String,

    /// Base URL of the Spotify Web API
    #[arg(long, env = "SPOTIFY_API_URL", default_value = "https://api.spotify.com/v1")]
    pub api_url: String,
}

#[derive(Clone, Debug, Args)]
pub struct SessionConfig {
    /// Secret used to sign session cookies
    #[arg(long = "session-secret-key", env = "SESSION_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Mark the session cookie `Secure` (requires HTTPS)
    #[arg(long, env = "SESSION_SECURE_COOKIE", default_value_t = false)]
    pub secure_cookie: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults_for_optional_values() {
        let config = Config::load_from([
            "monthlywrap",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "--session-secret-key",
            "key",
        ])
        .unwrap();

        assert_eq!(config.server.frontend_origin, "http://localhost:3000");
        assert_eq!(config.spotify.scope, "user-read-recently-played user-top-read");
        assert_eq!(config.spotify.accounts_url, "https://accounts.spotify.com");
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn invalid_values_are_returned_as_errors() {
        let err = Config::load_from([
            "monthlywrap",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "--session-secret-key",
            "key",
            "--port",
            "not-a-port",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let err = Config::load_from(["monthlywrap", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
