//! Local model runner (Ollama) adapter.
//!
//! Uses the native REST API: `/api/tags` for the installed-model inventory,
//! `/api/generate` (non-streaming) for text and `/api/embed` for vectors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::error::AgentError;
use crate::agent::options::{clamp_tokens, clamp_unit, GenerationOptions};
use crate::agent::providers::{endpoint, http, EmbeddingProvider, Provider, Transport, Vendor};

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3:4b";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text:latest";

const MAX_PREDICT: u32 = 32_768;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    options: RunnerOptions,
}

#[derive(Debug, Default, Serialize)]
struct RunnerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

/// Names of every model installed on the runner at `host`.
pub async fn installed_models(
    host: &str,
    transport: &Transport,
) -> Result<Vec<String>, AgentError> {
    let url = endpoint(host, "api/tags");
    let timeout = transport.timeout;

    let tags: TagsResponse = transport
        .pool
        .run(Vendor::Ollama, move || http::get_json(Vendor::Ollama, &url, timeout))
        .await?;
    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    host: String,
    model: String,
    instructions: Option<String>,
    transport: Transport,
}

impl OllamaProvider {
    pub fn new(host: impl Into<String>, model: impl Into<String>, transport: Transport) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            instructions: None,
            transport,
        }
    }

    /// Unset options are left to the runner's own defaults.
    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            system: self.instructions.clone().filter(|s| !s.is_empty()),
            options: RunnerOptions {
                temperature: clamp_unit(options.temperature, 0.0, 2.0),
                top_p: clamp_unit(options.top_p, 0.0, 1.0),
                num_predict: clamp_tokens(options.max_output_tokens, MAX_PREDICT),
            },
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Ollama
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
        let url = endpoint(&self.host, "api/generate");
        let timeout = self.transport.timeout;

        debug!(model = %self.model, "Ollama generate");
        let response: GenerateResponse = self
            .transport
            .pool
            .run(Vendor::Ollama, move || {
                http::post_json(Vendor::Ollama, &url, None, &body, timeout)
            })
            .await?;
        response.response.ok_or_else(|| {
            AgentError::provider(Vendor::Ollama, "response field missing from generate output")
        })
    }
}

#[derive(Debug, Clone)]
pub struct OllamaEmbeddingProvider {
    host: String,
    model: String,
    transport: Transport,
}

impl OllamaEmbeddingProvider {
    pub fn new(host: impl Into<String>, model: impl Into<String>, transport: Transport) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            transport,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    fn vendor(&self) -> Vendor {
        Vendor::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        let body = EmbedRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };
        let url = endpoint(&self.host, "api/embed");
        let timeout = self.transport.timeout;

        let response: EmbedResponse = self
            .transport
            .pool
            .run(Vendor::Ollama, move || {
                http::post_json(Vendor::Ollama, &url, None, &body, timeout)
            })
            .await?;
        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| {
                AgentError::provider(Vendor::Ollama, "No embedding returned from Ollama")
            })
    }
}
