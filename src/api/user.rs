use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    api::{AppState, session::CurrentSession},
    error::{AppError, Result},
    types::{TrackSummary, UserProfile},
    utils,
};

pub const DEFAULT_DISPLAY_NAME: &str = "User";

#[derive(Debug, Default, Deserialize)]
pub struct TopTracksParams {
    /// Kept raw so that a non-integer value falls back to the default.
    pub limit: Option<String>,
}

pub async fn user_info(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<UserProfile>> {
    let token = state
        .token_manager
        .access_token(&session)
        .await?
        .ok_or(AppError::NotAuthenticated)?;

    let profile = state.spotify.current_user(&token).await?;

    Ok(Json(UserProfile {
        display_name: profile
            .display_name
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
    }))
}

/// Short-term top tracks, at most 10.
///
/// Limits above the cap are silently lowered; zero or negative limits are
/// forwarded to Spotify as given.
pub async fn top_tracks(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<TopTracksParams>,
) -> Result<Json<Vec<TrackSummary>>> {
    let token = state
        .token_manager
        .access_token(&session)
        .await?
        .ok_or(AppError::NotAuthenticated)?;

    let limit = utils::clamp_limit(utils::parse_limit(params.limit.as_deref()));
    let response = state.spotify.top_tracks(&token, limit).await?;

    let mut tracks: Vec<TrackSummary> = response.items.into_iter().map(TrackSummary::from).collect();
    if limit > 0 {
        tracks.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    Ok(Json(tracks))
}
