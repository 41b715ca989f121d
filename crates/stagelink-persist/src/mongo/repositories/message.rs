use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::mongo::models::MongoMessage;

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<MongoMessage>,
}

impl MongoMessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Insert a single message
    pub async fn insert(&self, message: MongoMessage) -> Result<MongoMessage> {
        self.collection.insert_one(&message).await?;
        Ok(message)
    }

    /// Both directions of a conversation, oldest first
    pub async fn conversation_between(&self, a: ObjectId, b: ObjectId) -> Result<Vec<MongoMessage>> {
        let filter = doc! {
            "$or": [
                { "senderId": a, "receiverId": b },
                { "senderId": b, "receiverId": a },
            ]
        };
        let messages = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Every message sent or received by a user, newest first
    pub async fn all_for_user(&self, user: ObjectId) -> Result<Vec<MongoMessage>> {
        let filter = doc! {
            "$or": [
                { "senderId": user },
                { "receiverId": user },
            ]
        };
        let messages = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Unread messages from `other` to `user`, oldest first
    pub async fn unread_from(&self, user: ObjectId, other: ObjectId) -> Result<Vec<MongoMessage>> {
        let messages = self
            .collection
            .find(Self::unread_filter(user, other))
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Bulk mark-as-read on exactly the unread filter. Returns the number of
    /// documents modified; zero on a repeated call.
    pub async fn mark_read_from(&self, user: ObjectId, other: ObjectId) -> Result<u64> {
        let update = doc! {
            "$set": {
                "isRead": true,
                "readAt": bson::DateTime::now(),
            }
        };
        let result = self
            .collection
            .update_many(Self::unread_filter(user, other), update)
            .await?;
        Ok(result.modified_count)
    }

    // Shared between unread_from and mark_read_from so the mutation can never
    // touch a different set than the fetch.
    fn unread_filter(user: ObjectId, other: ObjectId) -> bson::Document {
        doc! {
            "senderId": other,
            "receiverId": user,
            "isRead": false,
        }
    }
}
