use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagelink_llm::{ChatMessage, CompletionClient, CompletionOptions};
use stagelink_persist::MessageStore;

use crate::error::{Result, SummarizeError};
use crate::parser::parse_summary;
use crate::prompt::{render_transcript, summary_prompt};

/// Result of a successful summarization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSummary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub message_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Summarizes the unread side of a conversation through the completion client
///
/// Messages are marked read only after a summary has been produced and
/// parsed; any failure leaves the unread set untouched.
pub struct ChatSummarizer {
    store: Arc<dyn MessageStore>,
    client: Arc<dyn CompletionClient>,
}

impl ChatSummarizer {
    pub fn new(store: Arc<dyn MessageStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    /// Summarize the unread messages sent by `other_user_id` to `user_id`
    pub async fn summarize_unread(&self, user_id: &str, other_user_id: &str) -> Result<ChatSummary> {
        let transcript = self.store.get_unread(user_id, other_user_id).await?;
        if transcript.is_empty() {
            return Err(SummarizeError::NoUnreadMessages);
        }
        let message_count = transcript.len();

        tracing::info!(user_id, other_user_id, message_count, "Summarizing unread messages");

        let prompt = summary_prompt(&render_transcript(&transcript));
        let raw = self
            .client
            .complete(vec![ChatMessage::user(prompt)], CompletionOptions::default())
            .await?;

        let parsed = parse_summary(&raw)?;

        // Read-state mutation strictly follows a successful parse.
        let marked = self.store.mark_read(user_id, other_user_id).await?;
        tracing::debug!(user_id, other_user_id, marked, "Conversation marked read after summary");

        Ok(ChatSummary {
            summary: parsed.summary,
            key_points: parsed.key_points,
            message_count,
            generated_at: Utc::now(),
        })
    }
}
