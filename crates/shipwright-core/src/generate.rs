use crate::error::Result;
use async_trait::async_trait;

/// One remote completion call: prompt in, produced text out, verbatim.
///
/// Implementations send exactly one request and never retry; a caller that
/// wants retries owns them per invocation site. Generated content is not
/// post-processed here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: 0.3,
            max_tokens: 4096,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
