//! Provider resolution. Picks exactly one adapter per call.
//!
//! The tiers form an ordered rule table. Each tier has a predicate over the
//! credentials (`Tier::matches`) and a factory (`bind` / `bind_embedding`);
//! the first tier whose predicate holds wins. There is no scoring and no
//! fallthrough to a lower tier once one has been chosen.
//!
//! Default order: Moonshot (only when enabled) > OpenAI > Ollama.

use std::time::Duration;

use tracing::info;

use crate::agent::credentials::Credentials;
use crate::agent::error::AgentError;
use crate::agent::providers::{
    self, moonshot, ollama, openai, EmbeddingHandle, MoonshotEmbeddingProvider,
    MoonshotProvider, OllamaEmbeddingProvider, OllamaProvider, OpenAiEmbeddingProvider,
    OpenAiProvider, ProviderHandle, Transport, Vendor,
};
use crate::agent::worker::{WorkerPool, DEFAULT_WORKER_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Moonshot,
    OpenAi,
    Ollama,
}

impl Tier {
    pub fn vendor(self) -> Vendor {
        match self {
            Tier::Moonshot => Vendor::Moonshot,
            Tier::OpenAi => Vendor::OpenAi,
            Tier::Ollama => Vendor::Ollama,
        }
    }

    fn matches(self, credentials: &Credentials) -> bool {
        match self {
            Tier::Moonshot => credentials.moonshot_key().is_some(),
            Tier::OpenAi => credentials.openai_key().is_some(),
            Tier::Ollama => true,
        }
    }
}

/// Endpoints and knobs for every tier.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub ollama_host: String,
    pub openai_base_url: String,
    pub moonshot_base_url: String,
    /// The Moonshot tier is reserved; it only joins the table when enabled.
    pub moonshot_enabled: bool,
    pub timeout: Duration,
    pub worker_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ollama_host: ollama::DEFAULT_HOST.to_string(),
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            moonshot_base_url: moonshot::DEFAULT_BASE_URL.to_string(),
            moonshot_enabled: false,
            timeout: providers::DEFAULT_TIMEOUT,
            worker_limit: DEFAULT_WORKER_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderResolver {
    tiers: Vec<Tier>,
    config: ResolverConfig,
    transport: Transport,
}

impl ProviderResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let mut tiers = Vec::with_capacity(3);
        if config.moonshot_enabled {
            tiers.push(Tier::Moonshot);
        }
        tiers.push(Tier::OpenAi);
        tiers.push(Tier::Ollama);

        let transport = Transport {
            timeout: config.timeout,
            pool: WorkerPool::new(config.worker_limit),
        };

        Self {
            tiers,
            config,
            transport,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// The tier that would serve `credentials`, without touching the network.
    pub fn selected_tier(&self, credentials: &Credentials) -> Tier {
        self.tiers
            .iter()
            .copied()
            .find(|tier| tier.matches(credentials))
            .unwrap_or(Tier::Ollama)
    }

    /// Binds a generation adapter.
    ///
    /// `requested_model` is the caller's model, `local_default` the manager's
    /// default used on the local path when nothing was requested.
    pub async fn resolve(
        &self,
        credentials: &Credentials,
        requested_model: Option<&str>,
        local_default: &str,
    ) -> Result<ProviderHandle, AgentError> {
        let tier = self.selected_tier(credentials);
        let handle = self
            .bind(tier, credentials, requested_model, local_default)
            .await?;

        info!(vendor = %handle.vendor(), model = handle.model(), "resolved generation provider");
        Ok(handle)
    }

    async fn bind(
        &self,
        tier: Tier,
        credentials: &Credentials,
        requested_model: Option<&str>,
        local_default: &str,
    ) -> Result<ProviderHandle, AgentError> {
        let handle: ProviderHandle = match tier {
            Tier::Moonshot => {
                let model = credentials
                    .moonshot_model
                    .as_deref()
                    .or(requested_model)
                    .unwrap_or(moonshot::DEFAULT_MODEL);
                Box::new(MoonshotProvider::new(
                    key(credentials.moonshot_key()),
                    model,
                    &self.config.moonshot_base_url,
                    self.transport.clone(),
                )?)
            }
            Tier::OpenAi => {
                let model = credentials
                    .openai_model
                    .as_deref()
                    .unwrap_or(openai::DEFAULT_MODEL);
                Box::new(OpenAiProvider::new(
                    key(credentials.openai_key()),
                    model,
                    &self.config.openai_base_url,
                    self.transport.clone(),
                )?)
            }
            Tier::Ollama => {
                let model = requested_model.unwrap_or(local_default);
                self.ensure_installed(model).await?;
                Box::new(OllamaProvider::new(
                    &self.config.ollama_host,
                    model,
                    self.transport.clone(),
                ))
            }
        };
        Ok(handle)
    }

    /// Binds an embedding adapter. Same tier order as [`Self::resolve`].
    pub async fn resolve_embedding(
        &self,
        credentials: &Credentials,
        requested_model: Option<&str>,
        local_default: &str,
    ) -> Result<EmbeddingHandle, AgentError> {
        let tier = self.selected_tier(credentials);
        let handle = self
            .bind_embedding(tier, credentials, requested_model, local_default)
            .await?;

        info!(vendor = %handle.vendor(), model = handle.model(), "resolved embedding provider");
        Ok(handle)
    }

    async fn bind_embedding(
        &self,
        tier: Tier,
        credentials: &Credentials,
        requested_model: Option<&str>,
        local_default: &str,
    ) -> Result<EmbeddingHandle, AgentError> {
        let handle: EmbeddingHandle = match tier {
            Tier::Moonshot => {
                let model = requested_model.unwrap_or(moonshot::DEFAULT_EMBEDDING_MODEL);
                Box::new(MoonshotEmbeddingProvider::new(
                    key(credentials.moonshot_key()),
                    model,
                    &self.config.moonshot_base_url,
                    self.transport.clone(),
                )?)
            }
            Tier::OpenAi => Box::new(OpenAiEmbeddingProvider::new(
                key(credentials.openai_key()),
                openai::DEFAULT_EMBEDDING_MODEL,
                &self.config.openai_base_url,
                self.transport.clone(),
            )?),
            Tier::Ollama => {
                let model = requested_model.unwrap_or(local_default);
                self.ensure_installed(model).await?;
                Box::new(OllamaEmbeddingProvider::new(
                    &self.config.ollama_host,
                    model,
                    self.transport.clone(),
                ))
            }
        };
        Ok(handle)
    }

    /// The only validation in the resolver: the local model must be installed.
    async fn ensure_installed(&self, model: &str) -> Result<(), AgentError> {
        let available = ollama::installed_models(&self.config.ollama_host, &self.transport).await?;
        if available.iter().any(|m| m == model) {
            return Ok(());
        }
        Err(AgentError::Configuration {
            vendor: Vendor::Ollama,
            model: model.to_string(),
            available,
        })
    }
}

fn key(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
