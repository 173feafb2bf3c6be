use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{LanguageModel, ModelError};

#[derive(Debug, Clone)]
pub struct ChatModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// OpenAI-compatible chat completions client. The prompt is sent as a single
/// user message.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    config: ChatModelConfig,
}

impl OpenAiChatModel {
    pub fn new(config: ChatModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ModelError::EmptyResponse)?;

        tracing::debug!(chars = content.len(), "model completion received");

        Ok(content.trim().to_owned())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
