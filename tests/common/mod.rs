#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use monthlywrap::{
    api::{self, AppState},
    config::{Config, LogFormat, ServerConfig, SessionConfig, SpotifyConfig},
    management::{MemoryStore, SessionId, SessionStore},
    types::{Session, TokenBundle},
    utils,
};
use tower::ServiceExt;
use wiremock::MockServer;

pub const SECRET: &str = "test-secret";
pub const FRONTEND: &str = "http://localhost:3000";

pub fn test_config(mock_uri: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            frontend_origin: FRONTEND.to_string(),
            log_format: LogFormat::Text,
        },
        spotify: SpotifyConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            scope: "user-read-recently-played user-top-read".to_string(),
            accounts_url: mock_uri.to_string(),
            api_url: format!("{mock_uri}/v1"),
        },
        session: SessionConfig {
            secret_key: SECRET.to_string(),
            secure_cookie: false,
        },
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub spotify: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(MemoryStore::new()).await
    }

    pub async fn spawn_with_store(store: MemoryStore) -> Self {
        let spotify = MockServer::start().await;
        let store = Arc::new(store);
        let state = AppState::new(test_config(&spotify.uri()), store.clone());

        TestApp {
            state,
            store,
            spotify,
        }
    }

    pub fn router(&self) -> Router {
        api::app_router(self.state.clone())
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    /// Stores `bundle` under a new session and returns the id plus a `Cookie` header value.
    pub fn authenticate(&self, bundle: TokenBundle) -> (SessionId, String) {
        let id = SessionId::generate();
        self.store.set(
            &id,
            Session {
                token: Some(bundle),
                ..Session::opened_at(utils::now_timestamp())
            },
        );
        (id.clone(), cookie_for(&id))
    }

    pub fn stored_token(&self, id: &SessionId) -> Option<TokenBundle> {
        self.store.get(id).and_then(|s| s.token)
    }
}

pub fn cookie_for(id: &SessionId) -> String {
    format!(
        "session={}",
        utils::encode_session_cookie(id.as_str(), SECRET)
    )
}

/// Bundle created `age` seconds ago with the given lifetime.
pub fn bundle(age: i64, expires_in: Option<i64>) -> TokenBundle {
    TokenBundle {
        access_token: "access".to_string(),
        refresh_token: "original-refresh".to_string(),
        expires_in,
        created_at: utils::now_timestamp() - age,
        scope: Some("user-read-recently-played user-top-read".to_string()),
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: header::HeaderName) -> &'a str {
    response.headers().get(name).unwrap().to_str().unwrap()
}
