use async_trait::async_trait;
use serde_json::json;

use super::LlmProvider;
use crate::errors::AppError;
use crate::models::ChatMessage;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const CLASSIFY_MAX_TOKENS: u32 = 50;

pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, body: serde_json::Value) -> Result<String, AppError> {
        let resp = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let data: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body: data,
            });
        }

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AppError::Ai("missing content in completion response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, AppError> {
        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        self.complete(json!({
            "model": self.model,
            "messages": chat_messages,
        }))
        .await
    }

    async fn classify(&self, prompt: &str) -> Result<String, AppError> {
        self.complete(json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": CLASSIFY_MAX_TOKENS,
        }))
        .await
    }
}
