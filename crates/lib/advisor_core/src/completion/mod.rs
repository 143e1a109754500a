//! Completion service — stateless chat completion over an ordered prompt.
//!
//! [`OpenAiCompletionService`] talks to any OpenAI-compatible
//! `/chat/completions` endpoint.

mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openai::{OPENAI_API_BASE, OpenAiCompletionService};

/// Default model used for advisor replies.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Errors from the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response parse error: {0}")]
    Parse(String),

    #[error("Completion service returned no choices")]
    NoChoices,

    #[error("Config error: {0}")]
    Config(String),
}

/// Role of one prompt entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One entry of the prompt message sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: Option<String>,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: Some(content.into()),
        }
    }
}

/// One candidate completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionChoice {
    /// Text of the reply; `None` if the service sent no content.
    pub content: Option<String>,
}

/// Generates replies for a prompt sequence.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submit `messages` to `model` and return every candidate, in order.
    async fn complete(
        &self,
        model: &str,
        messages: &[PromptMessage],
    ) -> Result<Vec<CompletionChoice>, CompletionError>;
}
