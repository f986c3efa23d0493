use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use flare_persist::{now_millis, ProviderKeys};
use crate::{error::ApiResult, routes::SaveResponse, state::AppState};

/// Provider keys arrive as a flat string map; nested values fail extraction
#[derive(Debug, Deserialize, ToSchema)]
pub struct KeysSaveRequest {
    pub client_id: String,
    #[schema(value_type = Object)]
    pub providers: ProviderKeys,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KeysResponse {
    #[schema(value_type = Object)]
    pub providers: ProviderKeys,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<i64>,
}

/// Get the provider keys of a client
#[utoipa::path(
    get,
    path = "/api/keys/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Stored keys, empty map when none", body = KeysResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "keys"
)]
pub async fn get_keys(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<KeysResponse>> {
    let response = match state.store.client()?.get_api_keys(&client_id).await? {
        Some(keys) => KeysResponse {
            providers: keys.providers,
            updated_at: Some(keys.updated_at),
        },
        None => KeysResponse {
            providers: ProviderKeys::new(),
            updated_at: None,
        },
    };
    Ok(Json(response))
}

/// Replace the provider keys of a client
#[utoipa::path(
    post,
    path = "/api/keys",
    request_body = KeysSaveRequest,
    responses(
        (status = 200, description = "Saved", body = SaveResponse),
        (status = 422, description = "Providers is not a flat string map"),
        (status = 500, description = "Database unavailable")
    ),
    tag = "keys"
)]
pub async fn save_keys(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<KeysSaveRequest>, JsonRejection>,
) -> ApiResult<Json<SaveResponse>> {
    let Json(body) = payload?;
    let now = now_millis();
    state
        .store
        .client()?
        .save_api_keys(&body.client_id, &body.providers, now)
        .await?;
    Ok(Json(SaveResponse::saved(now)))
}
