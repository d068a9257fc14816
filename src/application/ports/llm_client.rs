use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the raw reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
