use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::mongo::models::MongoUser;

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<MongoUser>,
}

impl MongoUserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("utilisateurs");
        Self { collection }
    }

    /// Fetch user records for a set of ids; missing ids are simply absent
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<MongoUser>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = doc! { "_id": { "$in": ids } };
        let users = self.collection.find(filter).await?.try_collect().await?;
        Ok(users)
    }
}
