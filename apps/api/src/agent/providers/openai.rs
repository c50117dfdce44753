use async_trait::async_trait;
use tracing::debug;

use crate::agent::error::AgentError;
use crate::agent::options::{clamp_tokens, clamp_unit, GenerationOptions};
use crate::agent::providers::chat::{
    self, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse,
};
use crate::agent::providers::{
    endpoint, http, require_key, EmbeddingProvider, Provider, Transport, Vendor,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Bound whenever an OpenAI key is present; the caller's generic model is ignored.
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

const MAX_OUTPUT_TOKENS: u32 = 16_384;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    instructions: Option<String>,
    transport: Transport,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        transport: Transport,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            api_key: require_key(Vendor::OpenAi, api_key)?,
            model: model.into(),
            base_url: base_url.into(),
            instructions: None,
            transport,
        })
    }

    /// Temperature in [0, 2], top_p in [0, 1], max_tokens in [1, 16384].
    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: chat::messages(self.instructions.as_deref(), prompt),
            temperature: clamp_unit(
                Some(options.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
                0.0,
                2.0,
            ),
            top_p: clamp_unit(Some(options.top_p.unwrap_or(DEFAULT_TOP_P)), 0.0, 1.0),
            max_tokens: clamp_tokens(options.max_output_tokens, MAX_OUTPUT_TOKENS),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn vendor(&self) -> Vendor {
        Vendor::OpenAi
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

        debug!(model = %self.model, "OpenAI chat completion");
        let response: ChatResponse = self
            .transport
            .pool
            .run(Vendor::OpenAi, move || {
                http::post_json(Vendor::OpenAi, &url, Some(api_key.as_str()), &body, timeout)
            })
            .await?;
        response.into_text(Vendor::OpenAi)
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingProvider {
    api_key: String,
    model: String,
    base_url: String,
    transport: Transport,
}

impl OpenAiEmbeddingProvider {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        transport: Transport,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            api_key: require_key(Vendor::OpenAi, api_key)?,
            model: model.into(),
            base_url: base_url.into(),
            transport,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn vendor(&self) -> Vendor {
        Vendor::OpenAi
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
            .run(Vendor::OpenAi, move || {
                http::post_json(Vendor::OpenAi, &url, Some(api_key.as_str()), &body, timeout)
            })
            .await?;
        response.into_vector(Vendor::OpenAi)
    }
}
