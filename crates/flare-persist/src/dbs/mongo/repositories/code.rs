use mongodb::{bson::doc, Collection, Database};

use crate::dbs::mongo::models::MongoCodeDoc;
use crate::dbs::CODE_COLLECTION;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoCodeRepository {
    collection: Collection<MongoCodeDoc>,
}

impl MongoCodeRepository {
    pub fn new(database: &Database) -> Self {
        let collection = database.collection(CODE_COLLECTION);
        Self { collection }
    }
    
    pub async fn get(&self, client_id: &str) -> Result<Option<MongoCodeDoc>> {
        let filter = doc! { "client_id": client_id };
        Ok(self.collection.find_one(filter).await?)
    }
    
    /// Overwrite the client's document, creating it on first save
    pub async fn save(&self, client_id: &str, html: &str, now: i64) -> Result<()> {
        let filter = doc! { "client_id": client_id };
        let update = doc! { "$set": { "html": html, "updatedAt": now } };
        self.collection.update_one(filter, update).upsert(true).await?;
        Ok(())
    }
}
