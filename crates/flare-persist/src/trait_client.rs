use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ApiKeys, ChatMessage, ChatThread, CodeDoc, MemoryItem, ProviderKeys};

/// Trait for document store operations
/// 
/// Every method is a single logical store round trip. Thread ids are the
/// store-native identifier in string form; implementations reject ids that do
/// not parse with `PersistError::InvalidObjectId`.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Names of the collections that currently exist (diagnostics only)
    async fn list_collections(&self) -> Result<Vec<String>>;
    
    /// All threads owned by a client, most recently updated first
    async fn list_threads(&self, client_id: &str) -> Result<Vec<ChatThread>>;
    
    /// Insert a new thread with `createdAt = updatedAt = now`
    async fn create_thread(
        &self,
        client_id: &str,
        title: String,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<ChatThread>;
    
    /// Append messages to an owned thread and bump `updatedAt`
    /// 
    /// Returns `None` when no thread with this id belongs to the client.
    async fn append_messages(
        &self,
        thread_id: &str,
        client_id: &str,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<Option<ChatThread>>;
    
    /// Delete an owned thread, returns whether a document was removed
    async fn delete_thread(&self, thread_id: &str, client_id: &str) -> Result<bool>;
    
    /// All memory items of a client, newest `ts` first
    async fn list_memory(&self, client_id: &str) -> Result<Vec<MemoryItem>>;
    
    /// Replace-or-insert the item for `(client_id, key)`
    async fn upsert_memory(
        &self,
        client_id: &str,
        key: &str,
        value: &str,
        now: i64,
    ) -> Result<MemoryItem>;
    
    /// Delete the item for `(client_id, key)`, returns whether one was removed
    async fn delete_memory(&self, client_id: &str, key: &str) -> Result<bool>;
    
    /// The saved code document of a client, if any
    async fn get_code(&self, client_id: &str) -> Result<Option<CodeDoc>>;
    
    /// Overwrite (or create) the code document of a client
    async fn save_code(&self, client_id: &str, html: &str, now: i64) -> Result<()>;
    
    /// The stored provider keys of a client, if any
    async fn get_api_keys(&self, client_id: &str) -> Result<Option<ApiKeys>>;
    
    /// Replace the whole provider map of a client
    async fn save_api_keys(
        &self,
        client_id: &str,
        providers: &ProviderKeys,
        now: i64,
    ) -> Result<()>;
}
