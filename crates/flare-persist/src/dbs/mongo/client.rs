use mongodb::{bson::doc, bson::oid::ObjectId, Database};
use async_trait::async_trait;

use crate::trait_client::PersistenceClient;
use crate::models::{ApiKeys, ChatMessage, ChatThread, CodeDoc, MemoryItem, ProviderKeys};
use crate::dbs::mongo::repositories::{
    MongoCodeRepository, MongoKeysRepository, MongoMemoryRepository, MongoThreadRepository,
};
use crate::error::{PersistError, Result};

pub struct MongoPersistenceClient {
    database: Database,
    thread_repo: MongoThreadRepository,
    memory_repo: MongoMemoryRepository,
    code_repo: MongoCodeRepository,
    keys_repo: MongoKeysRepository,
}

impl MongoPersistenceClient {
    /// Wrap an already configured database handle
    pub fn new(database: Database) -> Self {
        Self {
            thread_repo: MongoThreadRepository::new(&database),
            memory_repo: MongoMemoryRepository::new(&database),
            code_repo: MongoCodeRepository::new(&database),
            keys_repo: MongoKeysRepository::new(&database),
            database,
        }
    }
    
    /// Round trip to the server, fails when it cannot be selected
    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| PersistError::InvalidObjectId(e.to_string()))
}

#[async_trait]
impl PersistenceClient for MongoPersistenceClient {
    async fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }
    
    async fn list_threads(&self, client_id: &str) -> Result<Vec<ChatThread>> {
        let mongo_threads = self.thread_repo.list_threads(client_id).await?;
        Ok(mongo_threads.into_iter().map(|t| t.into()).collect())
    }
    
    async fn create_thread(
        &self,
        client_id: &str,
        title: String,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<ChatThread> {
        let mongo_thread = self.thread_repo
            .create_thread(client_id.to_string(), title, messages, now)
            .await?;
        Ok(mongo_thread.into())
    }
    
    async fn append_messages(
        &self,
        thread_id: &str,
        client_id: &str,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<Option<ChatThread>> {
        let object_id = parse_object_id(thread_id)?;
        let mongo_thread = self.thread_repo
            .append_messages(object_id, client_id, &messages, now)
            .await?;
        Ok(mongo_thread.map(|t| t.into()))
    }
    
    async fn delete_thread(&self, thread_id: &str, client_id: &str) -> Result<bool> {
        let object_id = parse_object_id(thread_id)?;
        self.thread_repo.delete_thread(object_id, client_id).await
    }
    
    async fn list_memory(&self, client_id: &str) -> Result<Vec<MemoryItem>> {
        let items = self.memory_repo.list_items(client_id).await?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }
    
    async fn upsert_memory(
        &self,
        client_id: &str,
        key: &str,
        value: &str,
        now: i64,
    ) -> Result<MemoryItem> {
        let item = self.memory_repo.upsert_item(client_id, key, value, now).await?;
        Ok(item.into())
    }
    
    async fn delete_memory(&self, client_id: &str, key: &str) -> Result<bool> {
        self.memory_repo.delete_item(client_id, key).await
    }
    
    async fn get_code(&self, client_id: &str) -> Result<Option<CodeDoc>> {
        Ok(self.code_repo.get(client_id).await?.map(|d| d.into()))
    }
    
    async fn save_code(&self, client_id: &str, html: &str, now: i64) -> Result<()> {
        self.code_repo.save(client_id, html, now).await
    }
    
    async fn get_api_keys(&self, client_id: &str) -> Result<Option<ApiKeys>> {
        Ok(self.keys_repo.get(client_id).await?.map(|k| k.into()))
    }
    
    async fn save_api_keys(
        &self,
        client_id: &str,
        providers: &ProviderKeys,
        now: i64,
    ) -> Result<()> {
        self.keys_repo.save(client_id, providers, now).await
    }
}
