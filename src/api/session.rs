use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::{api::AppState, config::SessionConfig, error::AppError, management::SessionId, utils};

pub const SESSION_COOKIE: &str = "session";

/// The caller's session, taken from a correctly signed session cookie.
///
/// Rejects with [`AppError::NotAuthenticated`] when the cookie is missing or
/// its signature does not match.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionId);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers, &state.config.session.secret_key)
            .map(CurrentSession)
            .ok_or(AppError::NotAuthenticated)
    }
}

pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| utils::decode_session_cookie(value, secret))
        .map(SessionId::new)
}

/// `Set-Cookie` value for `id`. No expiry: the cookie lasts for the browser session.
pub fn session_cookie(id: &SessionId, config: &SessionConfig) -> String {
    let value = utils::encode_session_cookie(id.as_str(), &config.secret_key);
    let secure = if config.secure_cookie { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax{secure}")
}
