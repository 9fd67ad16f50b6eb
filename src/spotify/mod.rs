//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It wraps the two services
//! the backend depends on:
//!
//! ```text
//! Handlers (api) / TokenManager (management)
//!          ↓
//! SpotifyClient
//!     ├── auth  - accounts service: authorize URL, code exchange, token refresh
//!     └── me    - Web API: current user profile, top tracks
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Calls return `reqwest::Error` only for transport and decoding failures. OAuth
//! errors reported by the accounts service arrive as a successfully decoded
//! [`TokenResponse`](crate::types::TokenResponse) with its `error` field set, and it
//! is up to the caller to decide what they mean.
//!
//! Outbound calls are issued once: there is no retry, backoff or explicit timeout.

pub mod auth;
pub mod me;

use reqwest::Client;

use crate::config::SpotifyConfig;

/// Handle to the Spotify accounts service and Web API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        SpotifyClient {
            http: Client::new(),
            config,
        }
    }

    fn token_url(&self) -> String {
        format!(
            "{base}/api/token",
            base = self.config.accounts_url.trim_end_matches('/')
        )
    }

    fn authorize_endpoint(&self) -> String {
        format!(
            "{base}/authorize",
            base = self.config.accounts_url.trim_end_matches('/')
        )
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{base}{path}",
            base = self.config.api_url.trim_end_matches('/')
        )
    }
}
