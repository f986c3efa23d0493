use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::dbs::{CODE_COLLECTION, KEYS_COLLECTION, MEMORY_COLLECTION, THREADS_COLLECTION};
use crate::error::{PersistError, Result};
use crate::models::{ApiKeys, ChatMessage, ChatThread, CodeDoc, MemoryItem, ProviderKeys};
use crate::trait_client::PersistenceClient;

/// Process-local store with the same observable semantics as the MongoDB backend
/// 
/// Ids are freshly generated ObjectIds in hex form, so clients see the same
/// identifier format and validation either way. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryPersistenceClient {
    threads: RwLock<Vec<ChatThread>>,
    memory: RwLock<Vec<MemoryItem>>,
    code: RwLock<HashMap<String, CodeDoc>>,
    keys: RwLock<HashMap<String, ApiKeys>>,
}

impl InMemoryPersistenceClient {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canonical (lowercase hex) form of an id, matching how ids are stored
fn normalize_object_id(id: &str) -> Result<String> {
    ObjectId::parse_str(id)
        .map(|oid| oid.to_hex())
        .map_err(|e| PersistError::InvalidObjectId(e.to_string()))
}

#[async_trait]
impl PersistenceClient for InMemoryPersistenceClient {
    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !self.threads.read().await.is_empty() {
            names.push(THREADS_COLLECTION.to_string());
        }
        if !self.memory.read().await.is_empty() {
            names.push(MEMORY_COLLECTION.to_string());
        }
        if !self.code.read().await.is_empty() {
            names.push(CODE_COLLECTION.to_string());
        }
        if !self.keys.read().await.is_empty() {
            names.push(KEYS_COLLECTION.to_string());
        }
        Ok(names)
    }
    
    async fn list_threads(&self, client_id: &str) -> Result<Vec<ChatThread>> {
        let mut threads: Vec<ChatThread> = self.threads
            .read()
            .await
            .iter()
            .filter(|t| t.client_id == client_id)
            .cloned()
            .collect();
        threads.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(threads)
    }
    
    async fn create_thread(
        &self,
        client_id: &str,
        title: String,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<ChatThread> {
        let thread = ChatThread {
            id: ObjectId::new().to_hex(),
            client_id: client_id.to_string(),
            title,
            messages,
            created_at: now,
            updated_at: now,
        };
        self.threads.write().await.push(thread.clone());
        Ok(thread)
    }
    
    async fn append_messages(
        &self,
        thread_id: &str,
        client_id: &str,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<Option<ChatThread>> {
        let thread_id = normalize_object_id(thread_id)?;
        let mut threads = self.threads.write().await;
        let Some(thread) = threads
            .iter_mut()
            .find(|t| t.id == thread_id && t.client_id == client_id)
        else {
            return Ok(None);
        };
        thread.messages.extend(messages);
        thread.updated_at = now;
        Ok(Some(thread.clone()))
    }
    
    async fn delete_thread(&self, thread_id: &str, client_id: &str) -> Result<bool> {
        let thread_id = normalize_object_id(thread_id)?;
        let mut threads = self.threads.write().await;
        match threads
            .iter()
            .position(|t| t.id == thread_id && t.client_id == client_id)
        {
            Some(idx) => {
                threads.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
    
    async fn list_memory(&self, client_id: &str) -> Result<Vec<MemoryItem>> {
        let mut items: Vec<MemoryItem> = self.memory
            .read()
            .await
            .iter()
            .filter(|i| i.client_id == client_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.ts.cmp(&a.ts));
        Ok(items)
    }
    
    async fn upsert_memory(
        &self,
        client_id: &str,
        key: &str,
        value: &str,
        now: i64,
    ) -> Result<MemoryItem> {
        let mut items = self.memory.write().await;
        if let Some(item) = items
            .iter_mut()
            .find(|i| i.client_id == client_id && i.key == key)
        {
            item.value = value.to_string();
            item.ts = now;
            return Ok(item.clone());
        }
        
        let item = MemoryItem {
            id: ObjectId::new().to_hex(),
            client_id: client_id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            ts: now,
        };
        items.push(item.clone());
        Ok(item)
    }
    
    async fn delete_memory(&self, client_id: &str, key: &str) -> Result<bool> {
        let mut items = self.memory.write().await;
        let before = items.len();
        items.retain(|i| !(i.client_id == client_id && i.key == key));
        Ok(items.len() < before)
    }
    
    async fn get_code(&self, client_id: &str) -> Result<Option<CodeDoc>> {
        Ok(self.code.read().await.get(client_id).cloned())
    }
    
    async fn save_code(&self, client_id: &str, html: &str, now: i64) -> Result<()> {
        let mut docs = self.code.write().await;
        let doc = docs.entry(client_id.to_string()).or_insert_with(|| CodeDoc {
            id: ObjectId::new().to_hex(),
            client_id: client_id.to_string(),
            html: String::new(),
            updated_at: now,
        });
        doc.html = html.to_string();
        doc.updated_at = now;
        Ok(())
    }
    
    async fn get_api_keys(&self, client_id: &str) -> Result<Option<ApiKeys>> {
        Ok(self.keys.read().await.get(client_id).cloned())
    }
    
    async fn save_api_keys(
        &self,
        client_id: &str,
        providers: &ProviderKeys,
        now: i64,
    ) -> Result<()> {
        let mut keys = self.keys.write().await;
        let entry = keys.entry(client_id.to_string()).or_insert_with(|| ApiKeys {
            id: ObjectId::new().to_hex(),
            client_id: client_id.to_string(),
            providers: ProviderKeys::new(),
            updated_at: now,
        });
        entry.providers = providers.clone();
        entry.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(content: &str, ts: i64) -> Vec<ChatMessage> {
        vec![
            ChatMessage::user(content, ts),
            ChatMessage::assistant(format!("Echo: {}", content), ts),
        ]
    }

    #[tokio::test]
    async fn test_append_requires_ownership() {
        let store = InMemoryPersistenceClient::new();
        let thread = store.create_thread("a", "hi".into(), pair("hi", 1), 1).await.unwrap();

        let foreign = store.append_messages(&thread.id, "b", pair("x", 2), 2).await.unwrap();
        assert!(foreign.is_none());

        let owned = store.append_messages(&thread.id, "a", pair("again", 3), 3).await.unwrap().unwrap();
        assert_eq!(owned.messages.len(), 4);
        assert_eq!(owned.messages[2].content, "again");
        assert_eq!(owned.created_at, 1);
        assert_eq!(owned.updated_at, 3);
        assert_eq!(owned.title, "hi");
    }

    #[tokio::test]
    async fn test_invalid_thread_id_is_rejected() {
        let store = InMemoryPersistenceClient::new();

        let err = store.append_messages("not-an-id", "a", vec![], 1).await.unwrap_err();
        assert!(matches!(err, PersistError::InvalidObjectId(_)));

        let err = store.delete_thread("zzz", "a").await.unwrap_err();
        assert!(matches!(err, PersistError::InvalidObjectId(_)));
    }

    #[tokio::test]
    async fn test_thread_id_matches_regardless_of_hex_case() {
        let store = InMemoryPersistenceClient::new();
        let thread = store.create_thread("a", "t".into(), pair("t", 1), 1).await.unwrap();
        let upper = thread.id.to_uppercase();

        let appended = store.append_messages(&upper, "a", pair("more", 2), 2).await.unwrap().unwrap();
        assert_eq!(appended.id, thread.id);
        assert_eq!(appended.messages.len(), 4);

        assert!(store.delete_thread(&upper, "a").await.unwrap());
        assert!(store.list_threads("a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_thread_is_idempotent_and_owner_scoped() {
        let store = InMemoryPersistenceClient::new();
        let thread = store.create_thread("a", "t".into(), pair("t", 1), 1).await.unwrap();

        assert!(!store.delete_thread(&thread.id, "b").await.unwrap());
        assert!(store.delete_thread(&thread.id, "a").await.unwrap());
        assert!(!store.delete_thread(&thread.id, "a").await.unwrap());
    }

    #[tokio::test]
    async fn test_threads_sorted_by_updated_at_desc() {
        let store = InMemoryPersistenceClient::new();
        let first = store.create_thread("a", "1".into(), pair("1", 10), 10).await.unwrap();
        store.create_thread("a", "2".into(), pair("2", 20), 20).await.unwrap();
        store.create_thread("other", "3".into(), pair("3", 30), 30).await.unwrap();
        store.append_messages(&first.id, "a", pair("bump", 40), 40).await.unwrap();

        let threads = store.list_threads("a").await.unwrap();
        let order: Vec<&str> = threads.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_memory_upsert_keeps_single_item() {
        let store = InMemoryPersistenceClient::new();
        let first = store.upsert_memory("c1", "k", "v1", 1).await.unwrap();
        let second = store.upsert_memory("c1", "k", "v2", 2).await.unwrap();

        assert_eq!(first.id, second.id);
        let items = store.list_memory("c1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, "v2");
        assert_eq!(items[0].ts, 2);

        assert!(store.delete_memory("c1", "k").await.unwrap());
        assert!(!store.delete_memory("c1", "k").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_are_replaced_not_merged() {
        let store = InMemoryPersistenceClient::new();
        let mut providers = ProviderKeys::new();
        providers.insert("openai".into(), "sk-1".into());
        providers.insert("anthropic".into(), "sk-2".into());
        store.save_api_keys("c1", &providers, 1).await.unwrap();

        let mut replacement = ProviderKeys::new();
        replacement.insert("groq".into(), "gk".into());
        store.save_api_keys("c1", &replacement, 2).await.unwrap();

        let keys = store.get_api_keys("c1").await.unwrap().unwrap();
        assert_eq!(keys.providers, replacement);
        assert_eq!(keys.updated_at, 2);
    }

    #[tokio::test]
    async fn test_collections_appear_after_first_write() {
        let store = InMemoryPersistenceClient::new();
        assert!(store.list_collections().await.unwrap().is_empty());

        store.save_code("c1", "<p>hi</p>", 1).await.unwrap();
        assert_eq!(store.list_collections().await.unwrap(), vec![CODE_COLLECTION.to_string()]);
    }
}
