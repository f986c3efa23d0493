use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use flare_persist::{now_millis, MemoryItem};
use crate::{error::ApiResult, routes::DeleteResponse, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct MemoryUpsertRequest {
    pub client_id: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMemoryResponse {
    pub items: Vec<MemoryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemoryItemResponse {
    pub item: MemoryItem,
}

/// List memory items for a client, newest first
#[utoipa::path(
    get,
    path = "/api/memory/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Memory items", body = ListMemoryResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "memory"
)]
pub async fn get_memory(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<ListMemoryResponse>> {
    let items = state.store.client()?.list_memory(&client_id).await?;
    Ok(Json(ListMemoryResponse { items }))
}

/// Create or replace the value stored under a key
#[utoipa::path(
    post,
    path = "/api/memory",
    request_body = MemoryUpsertRequest,
    responses(
        (status = 200, description = "Stored item", body = MemoryItemResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "memory"
)]
pub async fn upsert_memory(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MemoryUpsertRequest>, JsonRejection>,
) -> ApiResult<Json<MemoryItemResponse>> {
    let Json(body) = payload?;
    let item = state
        .store
        .client()?
        .upsert_memory(&body.client_id, &body.key, &body.value, now_millis())
        .await?;
    Ok(Json(MemoryItemResponse { item }))
}

/// Delete the item stored under a key
#[utoipa::path(
    delete,
    path = "/api/memory/{client_id}/{key}",
    params(
        ("client_id" = String, Path, description = "Client ID"),
        ("key" = String, Path, description = "Memory key")
    ),
    responses(
        (status = 200, description = "Whether an item was removed", body = DeleteResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "memory"
)]
pub async fn delete_memory(
    State(state): State<Arc<AppState>>,
    Path((client_id, key)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state.store.client()?.delete_memory(&client_id, &key).await?;
    Ok(Json(DeleteResponse { deleted }))
}
