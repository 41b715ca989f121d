pub mod message;
pub mod transcript;

pub use message::{Message, MessageKind, NewMessage};
pub use transcript::{ConversationPreview, TranscriptEntry};
