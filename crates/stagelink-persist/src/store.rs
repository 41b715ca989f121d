use crate::error::Result;
use crate::models::{ConversationPreview, Message, NewMessage, TranscriptEntry};
use async_trait::async_trait;

/// Trait for message persistence operations
///
/// The summarization pipeline talks to this seam; the Mongo implementation
/// lives in `crate::mongo`.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Create a message; it arrives unread
    async fn create_message(&self, new: NewMessage) -> Result<Message>;

    /// Full two-way history between two users, oldest first
    async fn get_conversation(&self, user_a: &str, user_b: &str) -> Result<Vec<Message>>;

    /// One preview row per conversation partner, most recent first
    async fn list_conversations(&self, user_id: &str) -> Result<Vec<ConversationPreview>>;

    /// Unread messages sent by `other_user_id` to `user_id`, oldest first,
    /// with sender display names resolved
    async fn get_unread(&self, user_id: &str, other_user_id: &str)
        -> Result<Vec<TranscriptEntry>>;

    /// Bulk-set `is_read`/`read_at` on the exact filter `get_unread` uses.
    /// Returns the number of messages affected; calling again is a no-op.
    async fn mark_read(&self, user_id: &str, other_user_id: &str) -> Result<u64>;
}
