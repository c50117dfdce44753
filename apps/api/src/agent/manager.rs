//! The two entry points the rest of the service calls.
//!
//! Each call resolves a fresh provider from the credentials it carries (plus
//! the environment for keys it left out), invokes it, and for generation runs
//! the strategy. Managers keep nothing between calls except their defaults.

use std::fmt;
use std::sync::Arc;

use crate::agent::credentials::{process_env, Credentials};
use crate::agent::error::AgentError;
use crate::agent::options::GenerationOptions;
use crate::agent::providers::ollama;
use crate::agent::resolver::ProviderResolver;
use crate::agent::strategy::{AgentOutput, Strategy};

/// Looks up a credential by environment variable name.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Per-call options for [`AgentManager::run`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub credentials: Credentials,
    /// Model for the local runner (and Moonshot). Ignored by the OpenAI tier.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_length: Option<u32>,
    pub top_p: Option<f32>,
    /// System instruction attached to the resolved provider for this call.
    pub instructions: Option<String>,
}

impl RunOptions {
    fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_length,
            top_p: self.top_p,
        }
    }
}

/// Per-call options for [`EmbeddingManager::embed`].
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    pub credentials: Credentials,
    pub model: Option<String>,
}

#[derive(Clone)]
pub struct AgentManager {
    strategy: Strategy,
    model: String,
    resolver: Arc<ProviderResolver>,
    env: EnvLookup,
}

impl AgentManager {
    pub fn new(
        resolver: Arc<ProviderResolver>,
        strategy: Option<&str>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            strategy: Strategy::from_tag(strategy),
            model: model.into(),
            resolver,
            env: Arc::new(process_env),
        }
    }

    /// JSON strategy with the default local model.
    pub fn with_defaults(resolver: Arc<ProviderResolver>) -> Self {
        Self::new(resolver, None, ollama::DEFAULT_MODEL)
    }

    /// Replaces the environment used for credential fallback.
    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn run(&self, prompt: &str, options: RunOptions) -> Result<AgentOutput, AgentError> {
        let generation = options.generation_options();
        let credentials = options.credentials.with_env_fallback(|key| (self.env)(key));

        let mut provider = self
            .resolver
            .resolve(&credentials, options.model.as_deref(), &self.model)
            .await?;
        if let Some(instructions) = options.instructions {
            provider.set_instructions(instructions);
        }

        self.strategy
            .apply(prompt, provider.as_ref(), &generation)
            .await
    }
}

impl fmt::Debug for AgentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentManager")
            .field("strategy", &self.strategy)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct EmbeddingManager {
    model: String,
    resolver: Arc<ProviderResolver>,
    env: EnvLookup,
}

impl EmbeddingManager {
    pub fn new(resolver: Arc<ProviderResolver>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            resolver,
            env: Arc::new(process_env),
        }
    }

    pub fn with_defaults(resolver: Arc<ProviderResolver>) -> Self {
        Self::new(resolver, ollama::DEFAULT_EMBEDDING_MODEL)
    }

    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn embed(&self, text: &str, options: EmbedOptions) -> Result<Vec<f32>, AgentError> {
        let credentials = options.credentials.with_env_fallback(|key| (self.env)(key));
        let provider = self
            .resolver
            .resolve_embedding(&credentials, options.model.as_deref(), &self.model)
            .await?;
        provider.embed(text).await
    }
}

impl fmt::Debug for EmbeddingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingManager")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
