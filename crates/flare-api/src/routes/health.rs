use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::{AppState, StoreHandle};

/// Number of collection names reported by the diagnostic endpoint
const MAX_LISTED_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiagnosticResponse {
    pub backend: String,
    pub database: String,
    pub collections: Vec<String>,
}

/// Liveness
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "FlareOS Backend Running".to_string(),
    })
}

/// Backend and database diagnostic
/// 
/// Never fails: an unavailable store or a failing collection listing is reported in the body.
#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Diagnostic report", body = DiagnosticResponse)
    ),
    tag = "health"
)]
pub async fn test_database(
    State(state): State<Arc<AppState>>,
) -> Json<DiagnosticResponse> {
    let collections = match &state.store {
        StoreHandle::Available(client) => match client.list_collections().await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                names
            }
            Err(e) => {
                tracing::warn!("Listing collections failed: {}", e);
                Vec::new()
            }
        },
        StoreHandle::Unavailable => Vec::new(),
    };
    
    let database = if state.store.is_available() {
        "✅ Connected"
    } else {
        "❌ Not Available"
    };
    
    Json(DiagnosticResponse {
        backend: "✅ Running".to_string(),
        database: database.to_string(),
        collections,
    })
}
