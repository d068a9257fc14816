use crate::domain::ConversationRecord;

use super::token_counter::fits_within;

const CONTENT_HEADER: &str = "Here is the content:\n\n";
const HISTORY_HEADER: &str = "Previous conversation:";

/// How much of the transcript may be carried into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryBudget {
    #[default]
    Unbounded,
    /// Oldest records are left out of the prompt until it fits. The document
    /// text and the question are never cut.
    MaxPromptTokens(usize),
}

impl HistoryBudget {
    pub fn from_max_tokens(max_prompt_tokens: Option<usize>) -> Self {
        max_prompt_tokens.map_or(Self::Unbounded, Self::MaxPromptTokens)
    }
}

/// Builds the prompt: document content, prior transcript if any, then the
/// question trailer.
pub fn compose_prompt(
    document_text: &str,
    history: &[ConversationRecord],
    question: &str,
) -> String {
    let mut prompt = String::from(CONTENT_HEADER);
    prompt.push_str(document_text);

    if !history.is_empty() {
        let transcript = history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        prompt.push_str("\n\n");
        prompt.push_str(HISTORY_HEADER);
        prompt.push('\n');
        prompt.push_str(&transcript);
    }

    prompt.push_str(&format!("\n\nQuestion: {question}\nAnswer:"));
    prompt
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer {
    budget: HistoryBudget,
}

impl PromptComposer {
    pub fn new(budget: HistoryBudget) -> Self {
        Self { budget }
    }

    pub fn compose(
        &self,
        document_text: &str,
        history: &[ConversationRecord],
        question: &str,
    ) -> String {
        let max_tokens = match self.budget {
            HistoryBudget::Unbounded => return compose_prompt(document_text, history, question),
            HistoryBudget::MaxPromptTokens(max_tokens) => max_tokens,
        };

        let mut skipped = 0;
        loop {
            let prompt = compose_prompt(document_text, &history[skipped..], question);
            if skipped == history.len() || fits_within(&prompt, max_tokens) {
                if skipped > 0 {
                    tracing::warn!(
                        skipped,
                        kept = history.len() - skipped,
                        max_tokens,
                        "Oldest conversation records left out of prompt"
                    );
                }
                return prompt;
            }
            skipped += 1;
        }
    }
}
