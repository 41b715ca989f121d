use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{ConversationPreview, Message, NewMessage, TranscriptEntry};
use crate::mongo::models::{MongoMessage, MongoUser};
use crate::mongo::repositories::{MongoMessageRepository, MongoUserRepository};
use crate::store::MessageStore;

/// MongoDB-backed implementation of [`MessageStore`]
pub struct MongoMessageStore {
    messages: MongoMessageRepository,
    users: MongoUserRepository,
}

impl MongoMessageStore {
    /// Connect to MongoDB and create the store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            messages: MongoMessageRepository::new(&client, database),
            users: MongoUserRepository::new(&client, database),
        })
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| PersistError::InvalidObjectId(id.to_string()))
    }

    async fn user_map(&self, ids: &[ObjectId]) -> Result<HashMap<ObjectId, MongoUser>> {
        let users = self.users.find_by_ids(ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn create_message(&self, new: NewMessage) -> Result<Message> {
        let sender = Self::parse_id(&new.sender_id)?;
        let receiver = Self::parse_id(&new.receiver_id)?;

        let inserted = self
            .messages
            .insert(MongoMessage::new(sender, receiver, new.content, new.kind))
            .await?;
        tracing::debug!(message_id = %inserted.id, "Message created");
        Ok(inserted.into())
    }

    async fn get_conversation(&self, user_a: &str, user_b: &str) -> Result<Vec<Message>> {
        let a = Self::parse_id(user_a)?;
        let b = Self::parse_id(user_b)?;

        let messages = self.messages.conversation_between(a, b).await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }

    async fn list_conversations(&self, user_id: &str) -> Result<Vec<ConversationPreview>> {
        let user = Self::parse_id(user_id)?;
        let messages = self.messages.all_for_user(user).await?;

        // Count unread per partner before folding into previews
        let mut unread_counts: HashMap<ObjectId, u64> = HashMap::new();
        for msg in &messages {
            if msg.receiver_id == user && !msg.is_read {
                *unread_counts.entry(msg.sender_id).or_default() += 1;
            }
        }

        let mut other_ids: Vec<ObjectId> = Vec::new();
        for msg in &messages {
            let other = if msg.sender_id == user { msg.receiver_id } else { msg.sender_id };
            if !other_ids.contains(&other) {
                other_ids.push(other);
            }
        }
        let users = self.user_map(&other_ids).await?;

        // Messages are newest first, so the first message seen per partner
        // is the conversation's latest.
        let mut previews: Vec<ConversationPreview> = Vec::with_capacity(other_ids.len());
        for other in other_ids {
            let Some(latest) = messages
                .iter()
                .find(|m| m.sender_id == other || m.receiver_id == other)
            else {
                continue;
            };
            let record = users.get(&other);
            previews.push(ConversationPreview {
                user_id: other.to_hex(),
                display_name: record
                    .map(MongoUser::display_name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                role: record.and_then(|u| u.role.clone()),
                last_message: latest.content.clone(),
                last_message_at: latest.created_at.to_chrono(),
                unread_count: unread_counts.get(&other).copied().unwrap_or(0),
            });
        }
        Ok(previews)
    }

    async fn get_unread(&self, user_id: &str, other_user_id: &str) -> Result<Vec<TranscriptEntry>> {
        let user = Self::parse_id(user_id)?;
        let other = Self::parse_id(other_user_id)?;

        let messages = self.messages.unread_from(user, other).await?;

        let sender_ids: Vec<ObjectId> = vec![other];
        let users = self.user_map(&sender_ids).await?;

        let entries = messages
            .into_iter()
            .map(|msg| {
                let sender = users
                    .get(&msg.sender_id)
                    .map(MongoUser::display_name)
                    .unwrap_or_else(|| "Unknown".to_string());
                TranscriptEntry::new(sender, msg.content)
            })
            .collect();
        Ok(entries)
    }

    async fn mark_read(&self, user_id: &str, other_user_id: &str) -> Result<u64> {
        let user = Self::parse_id(user_id)?;
        let other = Self::parse_id(other_user_id)?;

        let modified = self.messages.mark_read_from(user, other).await?;
        tracing::debug!(user_id, other_user_id, modified, "Marked conversation read");
        Ok(modified)
    }
}
