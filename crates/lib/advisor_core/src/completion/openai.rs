use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionChoice, CompletionError, CompletionService, PromptMessage};

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

/// Chat completions over an OpenAI-compatible HTTP API. No retries.
#[derive(Clone)]
pub struct OpenAiCompletionService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompletionService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(
        &self,
        model: &str,
        messages: &[PromptMessage],
    ) -> Result<Vec<CompletionChoice>, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::Config("OPENAI_API_KEY is required for completions".to_string())
        })?;

        let resp = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&ChatCompletionRequest { model, messages })
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(CompletionError::Status { status, body });
        }

        let data: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        into_choices(data)
    }
}

fn into_choices(data: ChatCompletionResponse) -> Result<Vec<CompletionChoice>, CompletionError> {
    if data.choices.is_empty() {
        return Err(CompletionError::NoChoices);
    }

    Ok(data
        .choices
        .into_iter()
        .map(|c| CompletionChoice {
            content: c.message.content,
        })
        .collect())
}
