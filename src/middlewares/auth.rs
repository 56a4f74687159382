use axum::{
    body::{self, BoxBody, Bytes, HttpBody},
    http::{header::AUTHORIZATION, HeaderValue, Request},
    response::{IntoResponse, Response},
    BoxError,
};
use futures::future::BoxFuture;
use std::{
    convert::Infallible,
    fmt,
    sync::Arc,
    task::{Context, Poll},
};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::debug;

use crate::errors::{AuthError, RejectReason};

const BEARER_PREFIX: &str = "Bearer ";

/// Result of checking one request's credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Allowed,
    Rejected(RejectReason),
}

/// Shared-secret bearer check.
///
/// Holds the full expected header value (`Bearer <token>`); the secret is
/// immutable after construction so clones can be handed to every request.
#[derive(Clone)]
pub struct AuthGate {
    expected: Arc<str>,
}

impl AuthGate {
    pub fn new(token: &str) -> AuthGate {
        AuthGate {
            expected: format!("{}{}", BEARER_PREFIX, token).into(),
        }
    }

    /// Exact, case-sensitive comparison of the raw header bytes.
    pub fn check(&self, header: Option<&HeaderValue>) -> AuthOutcome {
        match header {
            None => AuthOutcome::Rejected(RejectReason::MissingHeader),
            Some(value) => {
                if value.as_bytes().ct_eq(self.expected.as_bytes()).into() {
                    AuthOutcome::Allowed
                } else {
                    AuthOutcome::Rejected(RejectReason::InvalidToken)
                }
            }
        }
    }

    pub fn authorize<B>(&self, req: &Request<B>) -> Result<(), AuthError> {
        match self.check(req.headers().get(AUTHORIZATION)) {
            AuthOutcome::Allowed => Ok(()),
            AuthOutcome::Rejected(reason) => Err(AuthError::Unauthorized(reason)),
        }
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("expected", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AuthLayer {
    gate: AuthGate,
}

impl AuthLayer {
    pub fn new(gate: AuthGate) -> AuthLayer {
        AuthLayer { gate }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            gate: self.gate.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthMiddleware<S> {
    inner: S,
    gate: AuthGate,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AuthMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>, Error = Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: HttpBody<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<BoxError>,
{
    type Response = Response<BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        match self.gate.authorize(&req) {
            Ok(()) => {
                debug!(path = %req.uri().path(), "request authorized");
                // The clone may not be ready yet, so keep it and drive the one poll_ready prepared.
                let not_ready_inner = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, not_ready_inner);
                Box::pin(async move { Ok(inner.call(req).await?.map(body::boxed)) })
            }
            Err(err) => {
                let response = err.into_response();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
