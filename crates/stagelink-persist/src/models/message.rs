use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database-agnostic direct message between two users
///
/// Messages are created unread; `is_read`/`read_at` only change through the
/// bulk mark-as-read operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub kind: MessageKind,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(default)]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Audio,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults_to_text() {
        let new: NewMessage =
            serde_json::from_str(r#"{"sender_id":"a","receiver_id":"b","content":"hi"}"#).unwrap();
        assert_eq!(new.kind, MessageKind::Text);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MessageKind::Audio).unwrap(), "audio");
    }
}
