use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use stagelink_persist::{ConversationPreview, Message, MessageKind, NewMessage, TranscriptEntry};
use stagelink_summarizer::ChatSummary;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(default)]
    pub kind: MessageKind,
}

/// Create a message; it arrives unread
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMessageRequest>,
) -> ApiResult<Json<Message>> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Message content is required".to_string()));
    }

    let message = state
        .store
        .create_message(NewMessage {
            sender_id: req.sender_id,
            receiver_id: req.receiver_id,
            content: req.content,
            kind: req.kind,
        })
        .await?;

    Ok(Json(message))
}

#[derive(Debug, Deserialize)]
pub struct ConversationsQuery {
    pub user_id: String,
}

/// One preview row per conversation partner, most recent first
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConversationsQuery>,
) -> ApiResult<Json<Vec<ConversationPreview>>> {
    let previews = state.store.list_conversations(&query.user_id).await?;
    Ok(Json(previews))
}

/// Full two-way history between two users, oldest first
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path((user_a, user_b)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.store.get_conversation(&user_a, &user_b).await?;
    Ok(Json(messages))
}

/// Unread transcript sent by `other_user_id` to `user_id`, oldest first
pub async fn get_unread(
    State(state): State<Arc<AppState>>,
    Path((user_id, other_user_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<TranscriptEntry>>> {
    let entries = state.store.get_unread(&user_id, &other_user_id).await?;
    Ok(Json(entries))
}

/// Summarize the unread side of a conversation and mark it read
///
/// 404 when there is nothing unread; messages stay unread on any failure.
pub async fn summarize_unread(
    State(state): State<Arc<AppState>>,
    Path((user_id, other_user_id)): Path<(String, String)>,
) -> ApiResult<Json<ChatSummary>> {
    let summary = state
        .summarizer
        .summarize_unread(&user_id, &other_user_id)
        .await?;
    Ok(Json(summary))
}
