use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use miette::Diagnostic;
use thiserror::Error;

use crate::schemas::ApiResponse;

/// Why the gate turned a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingHeader,
    InvalidToken,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::MissingHeader => "Authorization header is required",
            RejectReason::InvalidToken => "Invalid token",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthorized: {}", .0.message())]
    Unauthorized(RejectReason),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::Unauthorized(reason) => reason.message(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        render(self.status(), self.message())
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("model not found: {0}")]
    ModelNotFound(String),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::Upstream(_) => render(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch models from upstream",
            ),
            RouteError::ModelNotFound(id) => {
                render(StatusCode::NOT_FOUND, &format!("Model not found: {}", id))
            }
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("no bearer token configured")]
    #[diagnostic(
        code(akash_proxy::config::missing_bearer_token),
        help("set BEARER_TOKEN to the secret clients must send as `Authorization: Bearer <token>`")
    )]
    MissingBearerToken,

    #[error("invalid listen address `{0}`")]
    #[diagnostic(
        code(akash_proxy::config::invalid_listen_address),
        help("HOST must be an IP address or a resolvable hostname")
    )]
    InvalidListenAddress(String),
}

/// Writes the `{Code, Data: {Message}}` envelope with a matching HTTP status.
pub fn render(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::failure(status.as_u16(), message))).into_response()
}
