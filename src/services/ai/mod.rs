pub mod intent;
pub mod openai;
pub mod time;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::ChatMessage;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the full transcript with a system prompt prepended; return the
    /// assistant's reply, whitespace-trimmed.
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, AppError>;

    /// Single-turn completion with a small output cap, for classification.
    async fn classify(&self, prompt: &str) -> Result<String, AppError>;
}
