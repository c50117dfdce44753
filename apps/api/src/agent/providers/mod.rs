//! Vendor adapters behind one two-operation contract: `generate` and `embed`.
//!
//! Each adapter builds its vendor's request body, runs the blocking HTTP call
//! on the shared [`WorkerPool`], and turns every failure into
//! [`AgentError::Provider`]. One attempt per call, no retries.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::error::AgentError;
use crate::agent::options::GenerationOptions;
use crate::agent::worker::WorkerPool;

mod chat;
pub(crate) mod http;
pub mod moonshot;
pub mod ollama;
pub mod openai;

pub use moonshot::{MoonshotEmbeddingProvider, MoonshotProvider};
pub use ollama::{OllamaEmbeddingProvider, OllamaProvider};
pub use openai::{OpenAiEmbeddingProvider, OpenAiProvider};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Ollama,
    OpenAi,
    Moonshot,
}

impl Vendor {
    pub fn name(self) -> &'static str {
        match self {
            Vendor::Ollama => "Ollama",
            Vendor::OpenAi => "OpenAI",
            Vendor::Moonshot => "Moonshot",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What every adapter needs to reach the network: a per-request timeout and
/// the pool that runs the blocking call.
#[derive(Debug, Clone)]
pub struct Transport {
    pub timeout: Duration,
    pub pool: WorkerPool,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            pool: WorkerPool::default(),
        }
    }
}

/// Text generation against one vendor + model.
#[async_trait]
pub trait Provider: Send + Sync {
    fn vendor(&self) -> Vendor;

    fn model(&self) -> &str;

    /// Sets the system instruction reused by every later `generate` call.
    fn set_instructions(&mut self, instructions: String);

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AgentError>;
}

/// Dense embeddings against one vendor + model. Dimensionality is the vendor's.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn vendor(&self) -> Vendor;

    fn model(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, AgentError>;
}

/// A resolved generation adapter.
pub type ProviderHandle = Box<dyn Provider>;

/// A resolved embedding adapter.
pub type EmbeddingHandle = Box<dyn EmbeddingProvider>;

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub(crate) fn require_key(vendor: Vendor, api_key: String) -> Result<String, AgentError> {
    if api_key.trim().is_empty() {
        return Err(AgentError::provider(
            vendor,
            format!("{vendor} API key is missing"),
        ));
    }
    Ok(api_key)
}
