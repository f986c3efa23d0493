use mongodb::{
    bson::{self, doc},
    Collection, Database,
};

use crate::dbs::mongo::models::MongoApiKeys;
use crate::dbs::KEYS_COLLECTION;
use crate::error::Result;
use crate::models::ProviderKeys;

#[derive(Clone)]
pub struct MongoKeysRepository {
    collection: Collection<MongoApiKeys>,
}

impl MongoKeysRepository {
    pub fn new(database: &Database) -> Self {
        let collection = database.collection(KEYS_COLLECTION);
        Self { collection }
    }
    
    pub async fn get(&self, client_id: &str) -> Result<Option<MongoApiKeys>> {
        let filter = doc! { "client_id": client_id };
        Ok(self.collection.find_one(filter).await?)
    }
    
    /// Replace the provider map wholesale; no merge with the previous one
    pub async fn save(&self, client_id: &str, providers: &ProviderKeys, now: i64) -> Result<()> {
        let filter = doc! { "client_id": client_id };
        let update = doc! {
            "$set": {
                "providers": bson::to_bson(providers)?,
                "updatedAt": now
            }
        };
        self.collection.update_one(filter, update).upsert(true).await?;
        Ok(())
    }
}
