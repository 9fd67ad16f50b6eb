use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::{AppState, session::session_from_headers},
    error::{AppError, Result},
    utils,
};

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// Completes the authorization-code flow.
///
/// Checks, in order: the provider's `error` parameter, the anti-forgery
/// `state` against the value issued by `/login`, and the presence of `code`.
/// The code is then exchanged for tokens, the bundle is stamped with the
/// current time and stored in the session, and the browser is sent back to
/// the frontend. A session that fails any check after its state was consumed
/// and holds no token is discarded.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Response> {
    if let Some(error) = params.error {
        return Err(AppError::AuthorizationDenied(error));
    }

    let session_id = session_from_headers(&headers, &state.config.session.secret_key)
        .ok_or(AppError::InvalidState)?;
    let mut session = state
        .sessions
        .get(&session_id)
        .ok_or(AppError::InvalidState)?;

    // single use, whatever the outcome
    let expected = session.oauth_state.take();
    if session.is_pending() {
        state.sessions.remove(&session_id);
    } else {
        state.sessions.set(&session_id, session.clone());
    }

    match (expected, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(AppError::InvalidState),
    }

    let code = params.code.ok_or(AppError::MissingCode)?;

    let bundle = state
        .spotify
        .exchange_code(&code)
        .await?
        .into_bundle(utils::now_timestamp(), None)
        .map_err(AppError::TokenExchange)?;

    tracing::info!(session = %session_id, "Authorization completed");

    session.token = Some(bundle);
    state.sessions.set(&session_id, session);

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, state.config.server.frontend_origin.clone())],
    )
        .into_response())
}
