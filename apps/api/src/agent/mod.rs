//! Agent layer: the single point of entry for every LLM call in the service.
//!
//! ARCHITECTURAL RULE: no other module may call a vendor API directly.
//! Generation goes through `AgentManager`, embeddings through `EmbeddingManager`.
//!
//! Each call resolves exactly one provider (Moonshot when enabled, then OpenAI,
//! then the local Ollama runner), runs its blocking HTTP call on the bounded
//! worker pool, and fails fast with `AgentError`. No retries.

pub mod credentials;
pub mod error;
pub mod manager;
pub mod options;
pub mod providers;
pub mod resolver;
pub mod strategy;
pub mod worker;

pub use credentials::Credentials;
pub use error::AgentError;
pub use manager::{AgentManager, EmbedOptions, EmbeddingManager, RunOptions};
pub use options::GenerationOptions;
pub use providers::Vendor;
pub use resolver::{ProviderResolver, ResolverConfig, Tier};
pub use strategy::{AgentOutput, Strategy};
