pub mod config;
pub mod error;
pub mod traits;
pub mod openrouter;

pub use config::CompletionConfig;
pub use error::LlmError;
pub use traits::{ChatMessage, CompletionClient, CompletionOptions, Role};
pub use openrouter::OpenRouterClient;
