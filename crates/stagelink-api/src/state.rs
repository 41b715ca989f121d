use std::sync::Arc;

use stagelink_persist::MessageStore;
use stagelink_summarizer::ChatSummarizer;

use crate::config::Config;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn MessageStore>,
    pub summarizer: Arc<ChatSummarizer>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn MessageStore>, summarizer: ChatSummarizer) -> Self {
        Self {
            config: Arc::new(config),
            store,
            summarizer: Arc::new(summarizer),
        }
    }
}
