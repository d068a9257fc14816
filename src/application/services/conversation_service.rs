use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::ports::{FileLoader, LlmClient, RepositoryError, SessionRepository};
use crate::domain::{
    ConversationHistory, ConversationRecord, Document, ExtractedDocument, Session, SessionId,
};

use super::answering_service::AnsweringService;
use super::extraction_service::{Extraction, ExtractionService};
use super::prompt_composer::PromptComposer;
use super::relevance_filter::{IRRELEVANT_QUESTION_ANSWER, RelevanceFilter};

#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    pub answer: String,
    pub notice: Option<String>,
    pub history: ConversationHistory,
}

/// Number of locks questions are serialised on; sessions hash onto them.
const ASK_LOCK_STRIPES: usize = 64;

/// Drives one session: input goes through extraction, every question through
/// composition and answering, successful exchanges land in the transcript.
///
/// Questions within one session are answered one at a time, so each prompt
/// carries every exchange recorded before it.
pub struct ConversationService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    extraction: ExtractionService<F>,
    answering: AnsweringService<L>,
    composer: PromptComposer,
    relevance_filter: RelevanceFilter,
    sessions: Arc<dyn SessionRepository>,
    ask_locks: Vec<Mutex<()>>,
}

impl<F, L> ConversationService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub fn new(
        file_loader: Arc<F>,
        llm_client: Arc<L>,
        sessions: Arc<dyn SessionRepository>,
        composer: PromptComposer,
        relevance_filter: RelevanceFilter,
    ) -> Self {
        Self {
            extraction: ExtractionService::new(file_loader),
            answering: AnsweringService::new(llm_client),
            composer,
            relevance_filter,
            sessions,
            ask_locks: (0..ASK_LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    fn ask_lock(&self, id: SessionId) -> &Mutex<()> {
        let stripe = (id.as_uuid().as_u128() % ASK_LOCK_STRIPES as u128) as usize;
        &self.ask_locks[stripe]
    }

    pub async fn start_session(&self) -> Result<SessionId, ConversationError> {
        let session = Session::new();
        self.sessions.create_session(&session).await?;
        tracing::info!(session_id = %session.id, "Session started");
        Ok(session.id)
    }

    /// Ends the session; its document and transcript are discarded.
    pub async fn end_session(&self, id: SessionId) -> Result<(), ConversationError> {
        if !self.sessions.remove_session(id).await? {
            return Err(ConversationError::SessionNotFound(id));
        }
        tracing::info!(session_id = %id, "Session ended");
        Ok(())
    }

    pub async fn session(&self, id: SessionId) -> Result<Session, ConversationError> {
        self.sessions
            .get_session(id)
            .await?
            .ok_or(ConversationError::SessionNotFound(id))
    }

    pub async fn load_text(
        &self,
        id: SessionId,
        content: &str,
    ) -> Result<Extraction, ConversationError> {
        self.session(id).await?;
        let extraction = self.extraction.extract_typed(content).await;
        self.store_document(id, &extraction).await?;
        Ok(extraction)
    }

    pub async fn load_upload(
        &self,
        id: SessionId,
        data: &[u8],
        document: &Document,
    ) -> Result<Extraction, ConversationError> {
        self.session(id).await?;
        let extraction = self.extraction.extract(data, document).await;
        self.store_document(id, &extraction).await?;
        Ok(extraction)
    }

    async fn store_document(
        &self,
        id: SessionId,
        extraction: &Extraction,
    ) -> Result<(), ConversationError> {
        self.sessions
            .replace_document(id, ExtractedDocument::new(extraction.text.clone()))
            .await
            .map_err(|e| not_found_as_session(id, e))
    }

    #[tracing::instrument(skip(self, question), fields(session_id = %id))]
    pub async fn ask(
        &self,
        id: SessionId,
        question: &str,
    ) -> Result<QuestionOutcome, ConversationError> {
        if question.trim().is_empty() {
            return Err(ConversationError::EmptyQuestion);
        }

        let _turn = self.ask_lock(id).lock().await;
        let session = self.session(id).await?;
        let document_text = session.document_text();
        if document_text.is_empty() {
            return Err(ConversationError::NoDocument);
        }

        if !self.relevance_filter.accepts(question, document_text) {
            tracing::info!("Question rejected by relevance filter");
            return Ok(QuestionOutcome {
                answer: IRRELEVANT_QUESTION_ANSWER.to_string(),
                notice: Some(IRRELEVANT_QUESTION_ANSWER.to_string()),
                history: session.history,
            });
        }

        let prompt = self
            .composer
            .compose(document_text, session.history.all(), question);
        let answer = self.answering.answer(&prompt).await;

        if !answer.is_success() {
            return Ok(QuestionOutcome {
                answer: answer.text,
                notice: answer.notice,
                history: session.history,
            });
        }

        let record = ConversationRecord::new(question, answer.text.clone());
        self.sessions
            .append_record(id, record.clone())
            .await
            .map_err(|e| not_found_as_session(id, e))?;

        let mut history = session.history;
        history.append(record);
        tracing::info!(exchanges = history.len(), "Question answered");

        Ok(QuestionOutcome {
            answer: answer.text,
            notice: None,
            history,
        })
    }
}

/// A session ended by another request mid-operation reads as not found.
fn not_found_as_session(id: SessionId, error: RepositoryError) -> ConversationError {
    match error {
        RepositoryError::NotFound(_) => ConversationError::SessionNotFound(id),
        other => ConversationError::Repository(other),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("no document content to ask about")]
    NoDocument,
    #[error("question is empty")]
    EmptyQuestion,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
