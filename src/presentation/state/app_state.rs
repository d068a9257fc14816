use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::ConversationService;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub conversation_service: Arc<ConversationService<F, L>>,
    pub max_upload_bytes: usize,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            conversation_service: Arc::clone(&self.conversation_service),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
