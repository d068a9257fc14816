use std::sync::Arc;

use crate::application::ports::LlmClient;

use super::token_counter::count_tokens;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub notice: Option<String>,
}

impl Answer {
    pub fn is_success(&self) -> bool {
        self.notice.is_none()
    }
}

pub struct AnsweringService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> AnsweringService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// One model call, no retries. Failures come back as an empty answer
    /// with a notice.
    #[tracing::instrument(skip(self, prompt))]
    pub async fn answer(&self, prompt: &str) -> Answer {
        tracing::debug!(prompt_tokens = count_tokens(prompt), "Sending prompt");

        match self.llm_client.complete(prompt).await {
            Ok(reply) => Answer {
                text: reply.trim().to_string(),
                notice: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Answering failed");
                Answer {
                    text: String::new(),
                    notice: Some(format!("Error communicating with the language model: {e}")),
                }
            }
        }
    }
}
