use async_trait::async_trait;

use crate::domain::{ConversationRecord, ExtractedDocument, Session, SessionId};

use super::RepositoryError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>, RepositoryError>;

    async fn replace_document(
        &self,
        id: SessionId,
        document: ExtractedDocument,
    ) -> Result<(), RepositoryError>;

    async fn append_record(
        &self,
        id: SessionId,
        record: ConversationRecord,
    ) -> Result<(), RepositoryError>;

    /// Drops the session with its document and transcript. Returns whether
    /// it existed.
    async fn remove_session(&self, id: SessionId) -> Result<bool, RepositoryError>;
}
