use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use flare_persist::now_millis;
use crate::{error::ApiResult, routes::SaveResponse, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CodeSaveRequest {
    pub client_id: String,
    pub html: String,
}

/// `updatedAt` is omitted, not null, when nothing was saved yet
#[derive(Debug, Serialize, ToSchema)]
pub struct CodeResponse {
    pub html: String,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Get the saved HTML document of a client
#[utoipa::path(
    get,
    path = "/api/code/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Saved document, empty html when none", body = CodeResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "code"
)]
pub async fn get_code(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<CodeResponse>> {
    let response = match state.store.client()?.get_code(&client_id).await? {
        Some(doc) => CodeResponse {
            html: doc.html,
            updated_at: Some(doc.updated_at),
        },
        None => CodeResponse {
            html: String::new(),
            updated_at: None,
        },
    };
    Ok(Json(response))
}

/// Overwrite the HTML document of a client
#[utoipa::path(
    post,
    path = "/api/code",
    request_body = CodeSaveRequest,
    responses(
        (status = 200, description = "Saved", body = SaveResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "code"
)]
pub async fn save_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CodeSaveRequest>, JsonRejection>,
) -> ApiResult<Json<SaveResponse>> {
    let Json(body) = payload?;
    let now = now_millis();
    state
        .store
        .client()?
        .save_code(&body.client_id, &body.html, now)
        .await?;
    Ok(Json(SaveResponse::saved(now)))
}
