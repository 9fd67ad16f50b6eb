use reqwest::Url;

use super::SpotifyClient;
use crate::types::TokenResponse;

impl SpotifyClient {
    /// Builds the URL the browser is sent to in order to grant access.
    ///
    /// Pure construction: the same `state` always yields the same URL. Query
    /// values are percent-encoded, so scopes may contain spaces.
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.authorize_url("Zx81...state");
    /// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
    /// ```
    pub fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("scope", self.config.scope.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("state", state),
        ];

        match Url::parse_with_params(&self.authorize_endpoint(), &params) {
            Ok(url) => url.to_string(),
            // unparseable accounts_url, send it through as-is
            Err(_) => format!(
                "{endpoint}?{query}",
                endpoint = self.authorize_endpoint(),
                query = params
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&")
            ),
        }
    }

    /// Exchanges an authorization code received on `/callback` for tokens.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` on network failure or if the body is not JSON.
    /// OAuth-level failures come back inside the `TokenResponse`.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, reqwest::Error> {
        self.http
            .post(self.token_url())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?
            .json::<TokenResponse>()
            .await
    }

    /// Trades a refresh token for a new access token.
    ///
    /// The response may or may not carry a new refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, reqwest::Error> {
        self.http
            .post(self.token_url())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?
            .json::<TokenResponse>()
            .await
    }
}
