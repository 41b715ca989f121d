use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stagelink_llm::LlmError;
use stagelink_persist::PersistError;
use stagelink_summarizer::SummarizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No unread messages to summarize")]
    NoUnreadMessages,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Completion endpoint rejected the request: {0}")]
    UpstreamRejected(String),

    #[error("Completion endpoint unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::NoUnreadMessages => ApiError::NoUnreadMessages,
            SummarizeError::Completion(LlmError::Rejected { status, body }) => {
                ApiError::UpstreamRejected(format!("{status}: {body}"))
            }
            SummarizeError::Completion(e @ LlmError::RetriesExhausted { .. }) => {
                ApiError::UpstreamUnavailable(e.to_string())
            }
            SummarizeError::Completion(e) => ApiError::Summarization(e.to_string()),
            e @ SummarizeError::MalformedSummary { .. } => ApiError::Summarization(e.to_string()),
            SummarizeError::Store(e) => ApiError::Persist(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoUnreadMessages => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) | ApiError::UpstreamRejected(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::UpstreamUnavailable(ref e) => {
                tracing::error!("Completion endpoint unavailable: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            ApiError::Summarization(ref e) => {
                tracing::error!("Summarization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Summarization failed".to_string(),
                )
            }
            ApiError::Persist(PersistError::InvalidObjectId(ref id)) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid user or message id: {id}"),
            ),
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
