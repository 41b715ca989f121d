pub mod error;
pub mod models;
pub mod store;
pub mod mongo;

pub use error::{PersistError, Result};
pub use models::{ConversationPreview, Message, MessageKind, NewMessage, TranscriptEntry};
pub use store::MessageStore;
pub use mongo::MongoMessageStore;
