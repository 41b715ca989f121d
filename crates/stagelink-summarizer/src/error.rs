use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("No unread messages to summarize")]
    NoUnreadMessages,

    #[error("Failed to parse summary from model: {reason}\nResponse: {raw}")]
    MalformedSummary { reason: String, raw: String },

    #[error(transparent)]
    Completion(#[from] stagelink_llm::LlmError),

    #[error(transparent)]
    Store(#[from] stagelink_persist::PersistError),
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
