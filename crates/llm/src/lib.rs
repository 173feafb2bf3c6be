mod client;
mod error;
mod json;

use async_trait::async_trait;

pub use client::*;
pub use error::*;
pub use json::*;

/// A text-completion model.
///
/// Calls are non-deterministic and may fail or return malformed content;
/// every caller in this workspace has a rule-based fallback for that case.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError>;
}

/// Model used when no API key is configured. Every call fails, which sends
/// callers straight to their fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledModel;

#[async_trait]
impl LanguageModel for DisabledModel {
    async fn complete(
        &self,
        _prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, ModelError> {
        Err(ModelError::NotConfigured)
    }
}
