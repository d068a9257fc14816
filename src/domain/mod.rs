mod conversation_history;
mod conversation_record;
mod document;
mod document_id;
mod extracted_document;
mod session;
mod session_id;

pub use conversation_history::ConversationHistory;
pub use conversation_record::ConversationRecord;
pub use document::{ContentType, Document, InputKind};
pub use document_id::DocumentId;
pub use extracted_document::ExtractedDocument;
pub use session::Session;
pub use session_id::SessionId;
