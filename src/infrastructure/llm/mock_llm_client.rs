use crate::application::ports::{LlmClient, LlmClientError};

pub struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok("Mock answer".to_string())
    }
}
