use std::sync::Mutex;
use std::sync::PoisonError;

use crate::application::ports::{LlmClient, LlmClientError};

/// Answers every prompt with a fixed reply and records what it was asked.
pub struct MockLlmClient {
    reply: Result<String, String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockLlmClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// `(system_prompt, user_prompt)` pairs in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((system_prompt.to_string(), user_prompt.to_string()));

        self.reply
            .clone()
            .map_err(LlmClientError::ApiRequestFailed)
    }
}
