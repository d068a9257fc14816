use chrono::{DateTime, Utc};

use super::{ConversationHistory, ExtractedDocument, SessionId};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub document: Option<ExtractedDocument>,
    pub history: ConversationHistory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            document: None,
            history: ConversationHistory::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Extracted text of the current input, empty when nothing usable was supplied.
    pub fn document_text(&self) -> &str {
        self.document
            .as_ref()
            .map(ExtractedDocument::as_str)
            .unwrap_or_default()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
