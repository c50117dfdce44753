//! Moonshot adapter. OpenAI-compatible wire format with a narrower option set:
//! temperature is forwarded only when already in range, `max_tokens` is capped
//! at 4096, and `top_p` is never sent.

use async_trait::async_trait;
use tracing::debug;

use crate::agent::error::AgentError;
use crate::agent::options::GenerationOptions;
use crate::agent::providers::chat::{
    self, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse,
};
use crate::agent::providers::{
    endpoint, http, require_key, EmbeddingProvider, Provider, Transport, Vendor,
};

pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_MODEL: &str = "moonshot-v1-8k";
pub const DEFAULT_EMBEDDING_MODEL: &str = "moonshot-embedding-v1";

const MAX_OUTPUT_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 3000;

#[derive(Debug, Clone)]
pub struct MoonshotProvider {
    api_key: String,
    model: String,
    base_url: String,
    instructions: Option<String>,
    transport: Transport,
}

impl MoonshotProvider {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        transport: Transport,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            api_key: require_key(Vendor::Moonshot, api_key)?,
            model: model.into(),
            base_url: base_url.into(),
            instructions: None,
            transport,
        })
    }

    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> ChatRequest {
        let temperature = options.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        let max_tokens = options.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

        ChatRequest {
            model: self.model.clone(),
            messages: chat::messages(self.instructions.as_deref(), prompt),
            temperature: (0.0..=2.0).contains(&temperature).then_some(temperature),
            top_p: None,
            max_tokens: (max_tokens > 0).then(|| max_tokens.min(MAX_OUTPUT_TOKENS)),
        }
    }
}

#[async_trait]
impl Provider for MoonshotProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Moonshot
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn set_instructions(&mut self, instructions: String) {
        self.instructions = Some(instructions);
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AgentError> {
        let body = self.build_request(prompt, options);
        let url = endpoint(&self.base_url, "chat/completions");
        let api_key = self.api_key.clone();
        let timeout = self.transport.timeout;

        debug!(
            model = %self.model,
            temperature = ?body.temperature,
            max_tokens = ?body.max_tokens,
            "Moonshot chat completion"
        );
        let response: ChatResponse = self
            .transport
            .pool
            .run(Vendor::Moonshot, move || {
                http::post_json(Vendor::Moonshot, &url, Some(api_key.as_str()), &body, timeout)
            })
            .await?;
        response.into_text(Vendor::Moonshot)
    }
}

#[derive(Debug, Clone)]
pub struct MoonshotEmbeddingProvider {
    api_key: String,
    model: String,
    base_url: String,
    transport: Transport,
}

impl MoonshotEmbeddingProvider {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        transport: Transport,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            api_key: require_key(Vendor::Moonshot, api_key)?,
            model: model.into(),
            base_url: base_url.into(),
            transport,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for MoonshotEmbeddingProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Moonshot
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        let body = EmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };
        let url = endpoint(&self.base_url, "embeddings");
        let api_key = self.api_key.clone();
        let timeout = self.transport.timeout;

        let response: EmbeddingResponse = self
            .transport
            .pool
            .run(Vendor::Moonshot, move || {
                http::post_json(Vendor::Moonshot, &url, Some(api_key.as_str()), &body, timeout)
            })
            .await?;
        response.into_vector(Vendor::Moonshot)
    }
}
