use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{Message, MessageKind};

/// MongoDB message document
///
/// Field names match the collection as the mobile clients wrote it
/// (camelCase, ObjectId references into `utilisateurs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "senderId")]
    pub sender_id: ObjectId,
    #[serde(rename = "receiverId")]
    pub receiver_id: ObjectId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(rename = "isRead", default)]
    pub is_read: bool,
    #[serde(rename = "readAt", default)]
    pub read_at: Option<bson::DateTime>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

impl MongoMessage {
    /// Build an unread message document with fresh timestamps
    pub fn new(sender_id: ObjectId, receiver_id: ObjectId, content: String, kind: MessageKind) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            sender_id,
            receiver_id,
            content,
            kind,
            is_read: false,
            read_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<MongoMessage> for Message {
    fn from(msg: MongoMessage) -> Self {
        Self {
            id: msg.id.to_hex(),
            sender_id: msg.sender_id.to_hex(),
            receiver_id: msg.receiver_id.to_hex(),
            content: msg.content,
            kind: msg.kind,
            is_read: msg.is_read,
            read_at: msg.read_at.map(|d| d.to_chrono()),
            created_at: msg.created_at.to_chrono(),
            updated_at: msg.updated_at.to_chrono(),
        }
    }
}

/// MongoDB user document, reduced to the fields the message store needs
///
/// The collection holds records written under two naming conventions:
/// `firstName`/`lastName` and `prenom`/`nom`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MongoUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl MongoUser {
    /// Canonical display name across both naming conventions
    ///
    /// Each half falls back from the English field to the French one;
    /// a record with neither yields "Unknown".
    pub fn display_name(&self) -> String {
        let first = self
            .first_name
            .as_deref()
            .or(self.prenom.as_deref())
            .unwrap_or("")
            .trim();
        let last = self
            .last_name
            .as_deref()
            .or(self.nom.as_deref())
            .unwrap_or("")
            .trim();

        let full = format!("{first} {last}");
        let full = full.trim();
        if full.is_empty() {
            "Unknown".to_string()
        } else {
            full.to_string()
        }
    }
}
