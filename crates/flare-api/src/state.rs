use std::sync::Arc;

use flare_persist::{InMemoryPersistenceClient, PersistenceClient, StoreBuilder};

use crate::config::{Config, StorageBackend};
use crate::error::{ApiError, ApiResult};

/// The shared store, or the explicit absence of one
/// 
/// Startup never fails on the database: an unconfigured or unreachable store
/// becomes `Unavailable` and every data request answers 500 instead.
#[derive(Clone)]
pub enum StoreHandle {
    Available(Arc<dyn PersistenceClient>),
    Unavailable,
}

impl StoreHandle {
    /// Build the store selected by config, degrading to `Unavailable` on any failure
    pub async fn connect(config: &Config) -> Self {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory store");
                StoreHandle::Available(Arc::new(InMemoryPersistenceClient::new()))
            }
            StorageBackend::Mongodb => {
                let Some(uri) = config.mongodb_uri.as_deref() else {
                    tracing::warn!("MONGODB_URI not set, database unavailable");
                    return StoreHandle::Unavailable;
                };
                
                tracing::info!("Connecting to MongoDB");
                let result = StoreBuilder::new()
                    .mongodb_uri(uri)
                    .database(&config.mongodb.database)
                    .pool_size(config.mongodb.pool_size)
                    .timeout_ms(config.mongodb.timeout_ms)
                    .app_name(env!("CARGO_PKG_NAME"))
                    .connect()
                    .await;
                
                match result {
                    Ok(client) => StoreHandle::Available(Arc::new(client)),
                    Err(e) => {
                        tracing::warn!("MongoDB unavailable: {}", e);
                        StoreHandle::Unavailable
                    }
                }
            }
        }
    }
    
    pub fn is_available(&self) -> bool {
        matches!(self, StoreHandle::Available(_))
    }
    
    /// The store client, or `DatabaseUnavailable` for the handler to return
    pub fn client(&self) -> ApiResult<&Arc<dyn PersistenceClient>> {
        match self {
            StoreHandle::Available(client) => Ok(client),
            StoreHandle::Unavailable => Err(ApiError::DatabaseUnavailable),
        }
    }
}

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: StoreHandle,
}

impl AppState {
    pub fn new(config: Config, store: StoreHandle) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
