//! # API Module
//!
//! HTTP endpoints served to the Monthly Wrap frontend.
//!
//! ## Endpoints
//!
//! | Route | Handler | Purpose |
//! |---|---|---|
//! | `GET /login` | [`login`] | 302 to Spotify's authorization page |
//! | `GET /callback` | [`callback`] | exchange the code, fill the session, 302 to the frontend |
//! | `GET /user-info` | [`user_info`] | `{display_name}` of the logged-in user |
//! | `GET /top-tracks` | [`top_tracks`] | short-term top tracks, `?limit=` (default 5, max 10) |
//! | `GET /health` | [`health`] | liveness |
//!
//! ## Sessions
//!
//! Handlers never touch hidden per-request globals. The caller's session is an
//! explicit [`SessionId`](crate::management::SessionId) recovered from a signed
//! cookie, either through the [`CurrentSession`] extractor or, where a missing
//! session is not an error, through [`session::session_from_headers`].
//!
//! ## Errors
//!
//! OAuth failures on `/callback` are answered with a plain-text body; the data
//! endpoints answer `401 {"error":"Not authenticated"}` when no usable token is
//! available. See [`AppError`](crate::error::AppError).

mod callback;
mod health;
mod login;
pub mod session;
mod user;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, Response, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use callback::{CallbackParams, callback};
pub use health::health;
pub use login::login;
pub use session::CurrentSession;
pub use user::{DEFAULT_DISPLAY_NAME, TopTracksParams, top_tracks, user_info};

use crate::{
    config::Config,
    management::{SessionStore, TokenManager},
    spotify::SpotifyClient,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionStore>,
    pub spotify: SpotifyClient,
    pub token_manager: TokenManager,
}

impl AppState {
    pub fn new(config: Config, sessions: Arc<dyn SessionStore>) -> Self {
        let spotify = SpotifyClient::new(config.spotify.clone());
        let token_manager = TokenManager::new(Arc::clone(&sessions), spotify.clone());

        AppState {
            config: Arc::new(config),
            sessions,
            spotify,
            token_manager,
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.frontend_origin);

    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/user-info", get(user_info))
        .route("/top-tracks", get(top_tracks))
        .route("/health", get(health))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestId>()
                        .and_then(|id| id.header_value().to_str().ok())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        tracing::info!(
                            status = response.status().as_u16(),
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    },
                ),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Lets the frontend call the data endpoints with its session cookie.
///
/// The allow-origin header is only sent back to a request whose `Origin` is
/// the frontend.
fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_origin) {
        Ok(origin) => layer.allow_origin(AllowOrigin::list([origin])),
        Err(e) => {
            tracing::warn!(error = %e, origin = frontend_origin, "Invalid frontend origin, CORS disabled");
            layer
        }
    }
}
