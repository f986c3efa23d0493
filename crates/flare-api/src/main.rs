use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flare_api::{
    build_router,
    config::Config,
    state::{AppState, StoreHandle},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    
    init_logging(&config);
    
    tracing::info!("Starting FlareOS API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);
    
    // Never fatal: requests report the outage instead
    let store = StoreHandle::connect(&config).await;
    if store.is_available() {
        tracing::info!("Store ready");
    }
    
    let state = Arc::new(AppState::new(config.clone(), store));
    let app = build_router(state);
    
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Diagnostics: http://{}/test", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);
    
    axum::serve(listener, app).await?;
    
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    
    let registry = tracing_subscriber::registry().with(env_filter);
    
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
