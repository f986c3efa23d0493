use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use flare_persist::{now_millis, ChatMessage, ChatThread};
use crate::{error::{ApiError, ApiResult}, routes::DeleteResponse, state::AppState};

const TITLE_MAX_CHARS: usize = 30;
const DEFAULT_TITLE: &str = "New Chat";

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub client_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListThreadsResponse {
    pub threads: Vec<ChatThread>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ThreadResponse {
    pub thread: ChatThread,
}

/// Title of a new thread: the trimmed message cut to 30 characters
pub fn derive_title(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    trimmed.chars().take(TITLE_MAX_CHARS).collect()
}

/// Stub assistant reply until provider calls are wired to the stored keys
fn assistant_reply(message: &str) -> String {
    format!("Echo: {}", message)
}

/// List threads for a client
#[utoipa::path(
    get,
    path = "/api/chats/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Threads, most recently updated first", body = ListThreadsResponse),
        (status = 500, description = "Database unavailable")
    ),
    tag = "chats"
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<ListThreadsResponse>> {
    let threads = state.store.client()?.list_threads(&client_id).await?;
    Ok(Json(ListThreadsResponse { threads }))
}

/// Threads of the client whose id is literally `send`
/// 
/// The static send route shares its path with the listing route for that client id.
pub async fn list_send_client_threads(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListThreadsResponse>> {
    list_threads(State(state), Path("send".to_string())).await
}

/// Send a message, creating the thread when no thread_id is given
#[utoipa::path(
    post,
    path = "/api/chats/send",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Thread after the exchange", body = ThreadResponse),
        (status = 400, description = "Invalid thread id"),
        (status = 404, description = "Thread not found"),
        (status = 500, description = "Database unavailable")
    ),
    tag = "chats"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<ThreadResponse>> {
    let Json(req) = payload?;
    let store = state.store.client()?;
    
    let now = now_millis();
    let exchange = vec![
        ChatMessage::user(&req.message, now),
        ChatMessage::assistant(assistant_reply(&req.message), now),
    ];
    
    let thread = match req.thread_id.as_deref().filter(|id| !id.is_empty()) {
        Some(thread_id) => store
            .append_messages(thread_id, &req.client_id, exchange, now)
            .await?
            .ok_or(ApiError::ThreadNotFound)?,
        None => {
            let thread = store
                .create_thread(&req.client_id, derive_title(&req.message), exchange, now)
                .await?;
            tracing::debug!(thread_id = %thread.id, "Thread created");
            thread
        }
    };
    
    Ok(Json(ThreadResponse { thread }))
}

/// Delete a thread owned by the client
#[utoipa::path(
    delete,
    path = "/api/chats/{client_id}/{thread_id}",
    params(
        ("client_id" = String, Path, description = "Client ID"),
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Whether a thread was removed", body = DeleteResponse),
        (status = 400, description = "Invalid thread id"),
        (status = 500, description = "Database unavailable")
    ),
    tag = "chats"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path((client_id, thread_id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state
        .store
        .client()?
        .delete_thread(&thread_id, &client_id)
        .await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_title_is_trimmed_and_truncated() {
        assert_eq!(
            derive_title("  Hello world, this is a long test message  "),
            "Hello world, this is a long te"
        );
        assert_eq!(derive_title("short"), "short");
    }
    
    #[test]
    fn test_blank_message_gets_default_title() {
        assert_eq!(derive_title(""), "New Chat");
        assert_eq!(derive_title("   \n"), "New Chat");
    }
    
    #[test]
    fn test_title_counts_characters_not_bytes() {
        let message = "é".repeat(40);
        assert_eq!(derive_title(&message).chars().count(), 30);
    }
}
