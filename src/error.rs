use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The provider redirected back with an `error` parameter.
    #[error("Error: {0}")]
    AuthorizationDenied(String),
    #[error("Error fetching token: {0}")]
    TokenExchange(String),
    #[error("Error: invalid state parameter")]
    InvalidState,
    #[error("Error: missing authorization code")]
    MissingCode,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthorizationDenied(ref code) => {
                tracing::info!(error = %code, "Authorization denied by provider");
                plain_text(StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::TokenExchange(ref description) => {
                tracing::warn!(error = %description, "Token exchange rejected");
                plain_text(StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::InvalidState | AppError::MissingCode => {
                tracing::debug!(error = %self, "Invalid callback");
                plain_text(StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotAuthenticated => {
                tracing::debug!("Request without usable token");
                json_error(StatusCode::UNAUTHORIZED, "Not authenticated")
            }
            AppError::Provider(e) => {
                tracing::error!(error = %e, "Provider request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
