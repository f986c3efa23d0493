use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::ReturnDocument,
    Collection, Database,
};
use futures::TryStreamExt;

use crate::dbs::mongo::models::MongoThread;
use crate::dbs::THREADS_COLLECTION;
use crate::error::Result;
use crate::models::ChatMessage;

#[derive(Clone)]
pub struct MongoThreadRepository {
    collection: Collection<MongoThread>,
}

impl MongoThreadRepository {
    pub fn new(database: &Database) -> Self {
        let collection = database.collection(THREADS_COLLECTION);
        Self { collection }
    }
    
    /// Insert a new thread
    pub async fn create_thread(
        &self,
        client_id: String,
        title: String,
        messages: Vec<ChatMessage>,
        now: i64,
    ) -> Result<MongoThread> {
        let thread = MongoThread {
            id: ObjectId::new(),
            client_id,
            title,
            messages,
            created_at: now,
            updated_at: now,
        };
        
        self.collection.insert_one(&thread).await?;
        Ok(thread)
    }
    
    /// List threads for a client, most recently updated first
    pub async fn list_threads(&self, client_id: &str) -> Result<Vec<MongoThread>> {
        let filter = doc! { "client_id": client_id };
        let threads = self.collection
            .find(filter)
            .sort(doc! { "updatedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(threads)
    }
    
    /// Push messages onto an owned thread and return the updated document
    pub async fn append_messages(
        &self,
        thread_id: ObjectId,
        client_id: &str,
        messages: &[ChatMessage],
        now: i64,
    ) -> Result<Option<MongoThread>> {
        let filter = doc! { "_id": thread_id, "client_id": client_id };
        let update = doc! {
            "$set": { "updatedAt": now },
            "$push": { "messages": { "$each": bson::to_bson(messages)? } }
        };
        
        let thread = self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(thread)
    }
    
    /// Delete an owned thread
    pub async fn delete_thread(&self, thread_id: ObjectId, client_id: &str) -> Result<bool> {
        let filter = doc! { "_id": thread_id, "client_id": client_id };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count == 1)
    }
}
