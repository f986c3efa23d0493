pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::routes::{chats, code, health, keys, memory};
use crate::state::AppState;

/// Upper bound for a single request; every handler is one store round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::test_database,
        chats::list_threads,
        chats::send_message,
        chats::delete_thread,
        memory::get_memory,
        memory::upsert_memory,
        memory::delete_memory,
        code::get_code,
        code::save_code,
        keys::get_keys,
        keys::save_keys,
    ),
    components(schemas(
        flare_persist::ChatThread,
        flare_persist::ChatMessage,
        flare_persist::MemoryItem,
        health::RootResponse,
        health::DiagnosticResponse,
        chats::SendMessageRequest,
        chats::ListThreadsResponse,
        chats::ThreadResponse,
        memory::MemoryUpsertRequest,
        memory::ListMemoryResponse,
        memory::MemoryItemResponse,
        code::CodeSaveRequest,
        code::CodeResponse,
        keys::KeysSaveRequest,
        keys::KeysResponse,
        routes::DeleteResponse,
        routes::SaveResponse,
    )),
    tags(
        (name = "health", description = "Liveness and diagnostics"),
        (name = "chats", description = "Chat threads"),
        (name = "memory", description = "Key-value memory"),
        (name = "code", description = "Saved HTML document"),
        (name = "keys", description = "Provider API keys")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/", get(health::root))
        .route("/test", get(health::test_database))
        // Chats
        .route(
            "/api/chats/send",
            get(chats::list_send_client_threads).post(chats::send_message),
        )
        .route("/api/chats/:client_id", get(chats::list_threads))
        .route("/api/chats/:client_id/:thread_id", delete(chats::delete_thread))
        // Memory
        .route("/api/memory", post(memory::upsert_memory))
        .route("/api/memory/:client_id", get(memory::get_memory))
        .route("/api/memory/:client_id/:key", delete(memory::delete_memory))
        // Code
        .route("/api/code", post(code::save_code))
        .route("/api/code/:client_id", get(code::get_code))
        // Keys
        .route("/api/keys", post(keys::save_keys))
        .route("/api/keys/:client_id", get(keys::get_keys));
    
    // Build full router with middleware
    api_routes
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if !config.cors.enabled {
        return CorsLayer::permissive();
    }
    
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);
    
    if config.cors.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed_origins: Vec<axum::http::HeaderValue> = config.cors.origins
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect();
        
        cors.allow_origin(parsed_origins)
    }
}
