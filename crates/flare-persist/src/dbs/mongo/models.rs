use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{ApiKeys, ChatMessage, ChatThread, CodeDoc, MemoryItem, ProviderKeys};

/// MongoDB-specific thread model (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThread {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// MongoDB-specific memory item model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMemoryItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    pub key: String,
    pub value: String,
    pub ts: i64,
}

/// MongoDB-specific code document model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoCodeDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    #[serde(default)]
    pub html: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// MongoDB-specific API keys model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoApiKeys {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub client_id: String,
    #[serde(default)]
    pub providers: ProviderKeys,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

// Conversions from MongoDB-specific to database-agnostic models

impl From<MongoThread> for ChatThread {
    fn from(thread: MongoThread) -> Self {
        Self {
            id: thread.id.to_hex(),
            client_id: thread.client_id,
            title: thread.title,
            messages: thread.messages,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

impl From<MongoMemoryItem> for MemoryItem {
    fn from(item: MongoMemoryItem) -> Self {
        Self {
            id: item.id.to_hex(),
            client_id: item.client_id,
            key: item.key,
            value: item.value,
            ts: item.ts,
        }
    }
}

impl From<MongoCodeDoc> for CodeDoc {
    fn from(doc: MongoCodeDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            client_id: doc.client_id,
            html: doc.html,
            updated_at: doc.updated_at,
        }
    }
}

impl From<MongoApiKeys> for ApiKeys {
    fn from(keys: MongoApiKeys) -> Self {
        Self {
            id: keys.id.to_hex(),
            client_id: keys.client_id,
            providers: keys.providers,
            updated_at: keys.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_thread_document_maps_id_to_hex() {
        let oid = ObjectId::new();
        let document = doc! {
            "_id": oid,
            "client_id": "c1",
            "title": "Hello",
            "messages": [
                { "role": "user", "content": "Hello", "ts": 5_i64 },
                { "role": "assistant", "content": "Echo: Hello", "ts": 5_i64 },
            ],
            "createdAt": 5_i64,
            "updatedAt": 7_i64,
        };

        let mongo_thread: MongoThread = bson::from_document(document).unwrap();
        let thread: ChatThread = mongo_thread.into();

        assert_eq!(thread.id, oid.to_hex());
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.created_at, 5);
        assert_eq!(thread.updated_at, 7);
    }

    #[test]
    fn test_thread_with_foreign_role_still_loads() {
        let document = doc! {
            "_id": ObjectId::new(),
            "client_id": "c1",
            "title": "Imported",
            "messages": [
                { "role": "system", "content": "be brief", "ts": 1_i64 },
            ],
            "createdAt": 1_i64,
            "updatedAt": 1_i64,
        };

        let thread: ChatThread = bson::from_document::<MongoThread>(document).unwrap().into();
        assert_eq!(thread.messages[0].role, crate::MessageRole::Other("system".to_string()));
    }

    #[test]
    fn test_api_keys_without_providers_default_to_empty() {
        let document = doc! {
            "_id": ObjectId::new(),
            "client_id": "c1",
            "updatedAt": 1_i64,
        };

        let keys: ApiKeys = bson::from_document::<MongoApiKeys>(document).unwrap().into();
        assert!(keys.providers.is_empty());
    }
}
