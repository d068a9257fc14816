use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRecord {
    question: String,
    answer: String,
}

impl ConversationRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for ConversationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q: {}\nA: {}", self.question, self.answer)
    }
}
