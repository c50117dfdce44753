use std::sync::Arc;

use crate::agent::{AgentManager, EmbeddingManager, ProviderResolver};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Markdown-strategy agent used for resume generation. Holds only defaults;
    /// the provider is resolved afresh on every call.
    pub resume_agent: AgentManager,
    /// Embedding facade on the same resolver, defaulting to `EMBEDDING_MODEL`.
    pub embedder: EmbeddingManager,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = Arc::new(ProviderResolver::new(config.resolver_config()));
        let resume_agent =
            AgentManager::new(resolver.clone(), Some("md"), config.generation_model.clone());
        let embedder = EmbeddingManager::new(resolver, config.embedding_model.clone());
        Self {
            config,
            resume_agent,
            embedder,
        }
    }
}
