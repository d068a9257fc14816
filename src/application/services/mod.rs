mod answering_service;
mod conversation_service;
mod extraction_service;
mod prompt_composer;
mod relevance_filter;
mod token_counter;

pub use answering_service::{Answer, AnsweringService};
pub use conversation_service::{ConversationError, ConversationService, QuestionOutcome};
pub use extraction_service::{Extraction, ExtractionService};
pub use prompt_composer::{
    HistoryBudget, PromptComposer, compose_prompt,
};
pub use relevance_filter::{IRRELEVANT_QUESTION_ANSWER, RelevanceFilter, is_relevant};
pub use token_counter::{count_tokens, fits_within};
