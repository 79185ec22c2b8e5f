//! Client for the chat-completions generation backend.

use crate::error::RemoteError;
use crate::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shipwright_core::generate::{GenerationRequest, TextGenerator};
use shipwright_core::ShipwrightError;

const ENDPOINT: &str = "completion";

pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl CompletionClient {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Result<Self> {
        Ok(Self {
            http: crate::http_client()?,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Send one completion request and return the first choice's text
    /// verbatim. Callers own any stripping of formatting artifacts the
    /// prompt failed to forbid.
    pub async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!("requesting completion from {url}");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(RemoteError::EmptyCompletion)
    }
}

#[async_trait]
impl TextGenerator for CompletionClient {
    async fn generate(&self, request: &GenerationRequest) -> shipwright_core::Result<String> {
        match self.complete(request).await {
            Ok(text) => Ok(text),
            Err(RemoteError::Status { status, body, .. }) => {
                Err(ShipwrightError::Generation { status, body })
            }
            Err(e) => Err(ShipwrightError::GenerationFailed(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
