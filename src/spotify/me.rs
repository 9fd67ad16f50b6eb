use super::SpotifyClient;
use crate::types::{TopTracksResponse, UserProfileResponse};

/// Time range used for top tracks: roughly the last four weeks.
pub const TOP_TRACKS_TIME_RANGE: &str = "short_term";

impl SpotifyClient {
    /// `GET /me` for the user owning `token`.
    ///
    /// The status code is not checked: an error body simply decodes into a
    /// profile without a display name.
    pub async fn current_user(&self, token: &str) -> Result<UserProfileResponse, reqwest::Error> {
        self.http
            .get(self.api_url("/me"))
            .bearer_auth(token)
            .send()
            .await?
            .json::<UserProfileResponse>()
            .await
    }

    /// `GET /me/top/tracks` over the short-term range.
    ///
    /// `limit` is forwarded untouched; clamping is the caller's business.
    pub async fn top_tracks(&self, token: &str, limit: i64) -> Result<TopTracksResponse, reqwest::Error> {
        let limit = limit.to_string();
        self.http
            .get(self.api_url("/me/top/tracks"))
            .query(&[("time_range", TOP_TRACKS_TIME_RANGE), ("limit", limit.as_str())])
            .bearer_auth(token)
            .send()
            .await?
            .json::<TopTracksResponse>()
            .await
    }
}
