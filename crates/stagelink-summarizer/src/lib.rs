pub mod error;
pub mod parser;
pub mod prompt;
pub mod summarizer;

pub use error::{Result, SummarizeError};
pub use parser::{parse_summary, ParsedSummary};
pub use summarizer::{ChatSummarizer, ChatSummary};
