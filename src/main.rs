mod api_client;
mod config;
mod errors;
mod middlewares;
mod routes;
mod schemas;

use axum::{extract::FromRef, routing::get, Router};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use crate::api_client::ApiClient;
use crate::config::{load_config, AppConfig};
use crate::middlewares::auth::{AuthGate, AuthLayer};
use crate::routes::{get_model, get_models, root};

#[derive(Clone, FromRef)]
pub struct AppState {
    client: ApiClient,
    gate: AuthGate,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> AppState {
        AppState {
            client: ApiClient::new(config.upstream_base_url.clone()),
            gate: AuthGate::new(&config.bearer_token),
        }
    }
}

/// Everything except `/` sits behind the bearer gate.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/v1/models", get(get_models))
        .route("/v1/models/:id", get(get_model))
        .layer(AuthLayer::new(state.gate.clone()))
        .route("/", get(root))
        .with_state(state)
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = load_config()?;
    init_tracing(&config.log_level);

    let addr = config.listen_addr().await?;
    let app = app(AppState::from_config(&config));

    tracing::info!("listening on {}", addr);
    axum::Server::try_bind(&addr)
        .into_diagnostic()?
        .serve(app.into_make_service())
        .await
        .into_diagnostic()
}
