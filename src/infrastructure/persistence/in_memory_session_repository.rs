use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{ConversationRecord, ExtractedDocument, Session, SessionId};

/// Sessions held in process memory until ended or idle too long; nothing is
/// written out.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every session not touched within `max_idle` and returns how
    /// many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let Some(cutoff) = TimeDelta::from_std(max_idle)
            .ok()
            .and_then(|idle| Utc::now().checked_sub_signed(idle))
        else {
            return 0;
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at > cutoff);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Longest pause between two idle sweeps.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically ends sessions idle for longer than `max_idle`.
pub fn spawn_idle_sweeper(
    repository: Arc<InMemorySessionRepository>,
    max_idle: Duration,
) -> JoinHandle<()> {
    let period = max_idle.clamp(Duration::from_secs(1), MAX_SWEEP_INTERVAL);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = repository.evict_idle(max_idle).await;
            if evicted > 0 {
                tracing::info!(evicted, "Idle sessions ended");
            }
        }
    })
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create_session(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::StorageFailed(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn replace_document(
        &self,
        id: SessionId,
        document: ExtractedDocument,
    ) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        session.document = Some(document);
        session.updated_at = Utc::now();
        Ok(())
    }

    async fn append_record(
        &self,
        id: SessionId,
        record: ConversationRecord,
    ) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        session.history.append(record);
        session.updated_at = Utc::now();
        Ok(())
    }

    async fn remove_session(&self, id: SessionId) -> Result<bool, RepositoryError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }
}
