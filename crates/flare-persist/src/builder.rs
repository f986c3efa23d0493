use std::time::Duration;

use mongodb::{options::ClientOptions, Client};

use crate::dbs::mongo::MongoPersistenceClient;
use crate::error::{PersistError, Result};

pub struct StoreBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
    pool_size: Option<u32>,
    timeout: Duration,
    app_name: Option<String>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
            pool_size: None,
            timeout: Duration::from_millis(3_000),
            app_name: None,
        }
    }
    
    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }
    
    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }
    
    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }
    
    /// Server selection timeout, also bounds the startup ping
    pub fn timeout_ms(mut self, millis: u64) -> Self {
        self.timeout = Duration::from_millis(millis);
        self
    }
    
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }
    
    /// Connect and ping, so an unreachable server fails here and not on the first request
    pub async fn connect(self) -> Result<MongoPersistenceClient> {
        let mongodb_uri = self.mongodb_uri
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| PersistError::Connection("mongodb_uri is required".to_string()))?;
        let database = self.database
            .filter(|db| !db.trim().is_empty())
            .ok_or_else(|| PersistError::Connection("database is required".to_string()))?;
        
        let mut options = ClientOptions::parse(mongodb_uri.as_str())
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        options.max_pool_size = self.pool_size;
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);
        options.app_name = self.app_name;
        
        let client = Client::with_options(options)
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        
        let store = MongoPersistenceClient::new(client.database(&database));
        store.ping()
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        
        tracing::info!(database = %database, "MongoDB connection established");
        Ok(store)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_uri_fails() {
        let result = StoreBuilder::new().database("flareos").connect().await;
        assert!(matches!(result, Err(PersistError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_without_database_fails() {
        let result = StoreBuilder::new()
            .mongodb_uri("mongodb://localhost:27017")
            .connect()
            .await;
        assert!(matches!(result, Err(PersistError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_with_malformed_uri_fails() {
        let result = StoreBuilder::new()
            .mongodb_uri("not a uri")
            .database("flareos")
            .connect()
            .await;
        assert!(matches!(result, Err(PersistError::Connection(_))));
    }
}
