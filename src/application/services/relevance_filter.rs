use std::collections::HashSet;

pub const IRRELEVANT_QUESTION_ANSWER: &str =
    "Please ask a question related to the provided content.";

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// True when the question shares at least one word with the document.
pub fn is_relevant(question: &str, document_text: &str) -> bool {
    let vocabulary: HashSet<String> = words(document_text).collect();
    words(question).any(|w| vocabulary.contains(&w))
}

/// Keyword-overlap gate in front of the model. Off unless configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceFilter {
    enabled: bool,
}

impl RelevanceFilter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn accepts(&self, question: &str, document_text: &str) -> bool {
        !self.enabled || is_relevant(question, document_text)
    }
}
