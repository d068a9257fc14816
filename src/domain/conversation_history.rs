use super::ConversationRecord;

/// Append-only transcript of one session, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    records: Vec<ConversationRecord>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ConversationRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[ConversationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record rendered as `Q: ..\nA: ..`, joined by newlines.
    pub fn transcript(&self) -> String {
        self.records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
