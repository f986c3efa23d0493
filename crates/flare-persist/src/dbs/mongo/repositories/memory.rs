use mongodb::{bson::doc, options::ReturnDocument, Collection, Database};
use futures::TryStreamExt;

use crate::dbs::mongo::models::MongoMemoryItem;
use crate::dbs::MEMORY_COLLECTION;
use crate::error::{PersistError, Result};

#[derive(Clone)]
pub struct MongoMemoryRepository {
    collection: Collection<MongoMemoryItem>,
}

impl MongoMemoryRepository {
    pub fn new(database: &Database) -> Self {
        let collection = database.collection(MEMORY_COLLECTION);
        Self { collection }
    }
    
    /// List memory items for a client, newest first
    pub async fn list_items(&self, client_id: &str) -> Result<Vec<MongoMemoryItem>> {
        let filter = doc! { "client_id": client_id };
        let items = self.collection
            .find(filter)
            .sort(doc! { "ts": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }
    
    /// Atomically set value and ts, inserting the item when the key is new
    pub async fn upsert_item(
        &self,
        client_id: &str,
        key: &str,
        value: &str,
        now: i64,
    ) -> Result<MongoMemoryItem> {
        let filter = doc! { "client_id": client_id, "key": key };
        let update = doc! { "$set": { "value": value, "ts": now } };
        
        self.collection
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| PersistError::Internal(format!("Upsert returned no document for key {}", key)))
    }
    
    /// Delete the item stored under a key
    pub async fn delete_item(&self, client_id: &str, key: &str) -> Result<bool> {
        let filter = doc! { "client_id": client_id, "key": key };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count == 1)
    }
}
