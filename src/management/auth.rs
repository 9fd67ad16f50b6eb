use std::sync::Arc;

use crate::{
    error::Result,
    management::{SessionId, SessionStore},
    spotify::SpotifyClient,
    types::TokenBundle,
    utils,
};

/// Tokens with less than this many seconds left are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Hands out access tokens for a session, refreshing them when close to expiry.
#[derive(Debug, Clone)]
pub struct TokenManager {
    sessions: Arc<dyn SessionStore>,
    spotify: SpotifyClient,
}

impl TokenManager {
    pub fn new(sessions: Arc<dyn SessionStore>, spotify: SpotifyClient) -> Self {
        TokenManager { sessions, spotify }
    }

    /// Returns a usable access token for `session`, or `None` if the session
    /// is not authenticated.
    ///
    /// `None` is returned when no bundle is stored, when the stored bundle has
    /// no `expires_in`, or when a needed refresh is rejected by the provider.
    /// At most one refresh request is made per call; a rejected refresh leaves
    /// the stored bundle untouched and the user has to log in again.
    ///
    /// # Errors
    ///
    /// Transport failures while refreshing are returned as
    /// [`AppError::Provider`](crate::error::AppError::Provider).
    pub async fn access_token(&self, session: &SessionId) -> Result<Option<String>> {
        let Some(bundle) = self.sessions.get(session).and_then(|s| s.token) else {
            return Ok(None);
        };

        let Some(remaining) = seconds_remaining(&bundle, utils::now_timestamp()) else {
            tracing::warn!(session = %session, "Stored token has no expires_in");
            return Ok(None);
        };

        if remaining >= EXPIRY_MARGIN_SECS {
            return Ok(Some(bundle.access_token));
        }

        tracing::debug!(session = %session, remaining, "Refreshing access token");
        let Some(refreshed) = self.refresh(&bundle).await? else {
            return Ok(None);
        };

        let access_token = refreshed.access_token.clone();
        let mut current = self.sessions.get(session).unwrap_or_default();
        current.token = Some(refreshed);
        self.sessions.set(session, current);

        Ok(Some(access_token))
    }

    async fn refresh(&self, bundle: &TokenBundle) -> Result<Option<TokenBundle>> {
        let response = self.spotify.refresh_token(&bundle.refresh_token).await?;

        match response.into_bundle(utils::now_timestamp(), Some(&bundle.refresh_token)) {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(description) => {
                tracing::warn!(error = %description, "Token refresh rejected");
                Ok(None)
            }
        }
    }
}

/// Seconds until `bundle` expires as seen at `now`; `None` without `expires_in`.
pub fn seconds_remaining(bundle: &TokenBundle, now: i64) -> Option<i64> {
    bundle
        .expires_in
        .map(|expires_in| expires_in.saturating_add(bundle.created_at).saturating_sub(now))
}
