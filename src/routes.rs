use crate::api_client::ApiClient;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::error;

use crate::errors::RouteError;
use crate::schemas::{ApiResponse, ModelRecord};

pub async fn root() -> &'static str {
    "akash_proxy - bearer-gated model catalog for Akash Chat."
}

pub async fn get_models(
    State(client): State<ApiClient>,
) -> Result<Json<ApiResponse<Vec<ModelRecord>>>, RouteError> {
    let models = fetch_models(&client).await?;

    Ok(Json(ApiResponse::new(200, models)))
}

pub async fn get_model(
    State(client): State<ApiClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ModelRecord>>, RouteError> {
    let model = fetch_models(&client)
        .await?
        .into_iter()
        .find(|model| model.id == id)
        .ok_or(RouteError::ModelNotFound(id))?;

    Ok(Json(ApiResponse::new(200, model)))
}

async fn fetch_models(client: &ApiClient) -> Result<Vec<ModelRecord>, RouteError> {
    client.list_models().await.map_err(|err| {
        error!(error = %err, "failed to fetch model catalog");
        RouteError::from(err)
    })
}
