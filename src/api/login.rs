use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::{
        AppState,
        session::{session_cookie, session_from_headers},
    },
    management::SessionId,
    types::Session,
    utils,
};

/// Starts the authorization-code flow.
///
/// Reuses the caller's session if the cookie is valid, otherwise opens a new
/// one. A fresh anti-forgery value is stored in the session and sent to
/// Spotify as `state`; `/callback` only accepts it back once. A session that
/// never reaches `/callback` is dropped by the store after its pending TTL.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = session_from_headers(&headers, &state.config.session.secret_key)
        .unwrap_or_else(SessionId::generate);

    let oauth_state = utils::generate_state();
    let mut session = state
        .sessions
        .get(&session_id)
        .unwrap_or_else(|| Session::opened_at(utils::now_timestamp()));
    session.oauth_state = Some(oauth_state.clone());
    state.sessions.set(&session_id, session);

    tracing::info!("Redirecting to Spotify authorization");

    (
        StatusCode::FOUND,
        [
            (header::LOCATION, state.spotify.authorize_url(&oauth_state)),
            (
                header::SET_COOKIE,
                session_cookie(&session_id, &state.config.session),
            ),
        ],
    )
        .into_response()
}
