use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of an unread conversation transcript, oldest first
///
/// Derived from a message plus its resolved sender name; never persisted.
/// The chronological order defines the narrative the model summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: String,
    pub message: String,
}

impl TranscriptEntry {
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }
}

/// Summary row for a user's conversation list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPreview {
    pub user_id: String,
    pub display_name: String,
    pub role: Option<String>,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u64,
}
