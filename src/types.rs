use serde::{Deserialize, Serialize};

/// Access/refresh token pair plus issuance metadata, as kept in a session.
///
/// `created_at + expires_in` is the absolute expiry instant. `expires_in` is
/// optional because the stored bundle mirrors whatever the provider returned;
/// a bundle without it is treated as unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub created_at: i64,
    pub scope: Option<String>,
}

/// Server-side state held for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Anti-forgery value issued by `/login` and consumed by `/callback`.
    pub oauth_state: Option<String>,
    pub token: Option<TokenBundle>,
    /// Unix seconds at which the session was opened.
    #[serde(default)]
    pub created_at: i64,
}

impl Session {
    /// An empty session opened at `now`.
    pub fn opened_at(now: i64) -> Self {
        Session {
            created_at: now,
            ..Session::default()
        }
    }

    /// A session that has not completed a login yet.
    pub fn is_pending(&self) -> bool {
        self.token.is_none()
    }
}

/// Raw body of the accounts service token endpoint.
///
/// The same shape covers success and failure: on failure only `error` and
/// optionally `error_description` are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Converts the response into a bundle stamped with `created_at`.
    ///
    /// `carried_refresh_token` replaces whatever refresh token the response holds;
    /// refresh responses may omit one and the original must survive.
    /// Returns the provider's description (or bare error code) on failure.
    pub fn into_bundle(
        self,
        created_at: i64,
        carried_refresh_token: Option<&str>,
    ) -> Result<TokenBundle, String> {
        if let Some(error) = self.error {
            return Err(self.error_description.unwrap_or(error));
        }

        let access_token = self
            .access_token
            .ok_or_else(|| "response did not contain an access token".to_string())?;

        let refresh_token = match carried_refresh_token {
            Some(token) => token.to_string(),
            None => self.refresh_token.unwrap_or_default(),
        };

        Ok(TokenBundle {
            access_token,
            refresh_token,
            expires_in: self.expires_in,
            created_at,
            scope: self.scope,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfileResponse {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackItem {
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

/// Frontend-facing shape of one top track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackSummary {
    pub name: Option<String>,
    pub artists: Vec<String>,
    pub album_image: Option<String>,
}

impl From<TrackItem> for TrackSummary {
    fn from(item: TrackItem) -> Self {
        let album_image = item
            .album
            .and_then(|album| album.images.into_iter().next())
            .and_then(|image| image.url);

        TrackSummary {
            name: item.name,
            artists: item
                .artists
                .into_iter()
                .filter_map(|artist| artist.name)
                .collect(),
            album_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_prefers_description() {
        let res: TokenResponse = serde_json::from_value(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        }))
        .unwrap();

        assert_eq!(
            res.into_bundle(0, None).unwrap_err(),
            "Invalid authorization code"
        );

        let bare: TokenResponse = serde_json::from_value(json!({ "error": "invalid_client" })).unwrap();
        assert_eq!(bare.into_bundle(0, None).unwrap_err(), "invalid_client");
    }

    #[test]
    fn carried_refresh_token_wins() {
        let res: TokenResponse = serde_json::from_value(json!({
            "access_token": "new-access",
            "refresh_token": "rotated",
            "expires_in": 3600
        }))
        .unwrap();

        let bundle = res.into_bundle(1_700_000_000, Some("original")).unwrap();
        assert_eq!(bundle.refresh_token, "original");
        assert_eq!(bundle.access_token, "new-access");
        assert_eq!(bundle.created_at, 1_700_000_000);
        assert_eq!(bundle.expires_in, Some(3600));
    }

    #[test]
    fn track_summary_degrades_on_missing_fields() {
        let item: TrackItem = serde_json::from_value(json!({
            "name": "Song",
            "artists": [{ "name": "A" }, { "id": "no-name" }, { "name": "B" }]
        }))
        .unwrap();

        let summary = TrackSummary::from(item);
        assert_eq!(summary.name.as_deref(), Some("Song"));
        assert_eq!(summary.artists, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(summary.album_image, None);

        let no_images: TrackItem =
            serde_json::from_value(json!({ "name": "X", "album": { "images": [] } })).unwrap();
        assert_eq!(TrackSummary::from(no_images).album_image, None);
    }

    #[test]
    fn track_summary_takes_first_image() {
        let item: TrackItem = serde_json::from_value(json!({
            "name": "Song",
            "artists": [],
            "album": { "images": [{ "url": "https://i/640" }, { "url": "https://i/300" }] }
        }))
        .unwrap();

        assert_eq!(
            TrackSummary::from(item).album_image.as_deref(),
            Some("https://i/640")
        );
    }
}
