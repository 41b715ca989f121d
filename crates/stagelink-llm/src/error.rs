use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("OPENROUTER_API_KEY not set in environment")]
    MissingApiKey,

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Completion endpoint rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Empty completion from model. Full response: {body}")]
    EmptyCompletion { body: String },

    #[error("Unparseable completion response: {reason}. Full response: {body}")]
    InvalidResponse { reason: String, body: String },

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

pub type Result<T> = std::result::Result<T, LlmError>;
