use std::time::Duration;

use anyhow::{Context, Result};

use crate::agent::providers::{moonshot, ollama, openai};
use crate::agent::worker::DEFAULT_WORKER_LIMIT;
use crate::agent::ResolverConfig;

/// Application configuration loaded from environment variables.
///
/// Vendor API keys are deliberately absent: they are read per call, and only
/// when the call did not supply one.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_host: String,
    pub openai_base_url: String,
    pub moonshot_base_url: String,
    pub enable_moonshot_provider: bool,
    pub provider_worker_limit: usize,
    pub provider_timeout: Duration,
    pub generation_model: String,
    pub embedding_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            ollama_host: env_or("OLLAMA_HOST", ollama::DEFAULT_HOST),
            openai_base_url: env_or("OPENAI_BASE_URL", openai::DEFAULT_BASE_URL),
            moonshot_base_url: env_or("MOONSHOT_BASE_URL", moonshot::DEFAULT_BASE_URL),
            enable_moonshot_provider: parse_env("ENABLE_MOONSHOT_PROVIDER", false)
                .context("ENABLE_MOONSHOT_PROVIDER must be true or false")?,
            provider_worker_limit: parse_env("PROVIDER_WORKER_LIMIT", DEFAULT_WORKER_LIMIT)
                .context("PROVIDER_WORKER_LIMIT must be a positive integer")?,
            provider_timeout: Duration::from_secs(
                parse_env("PROVIDER_TIMEOUT_SECS", 60)
                    .context("PROVIDER_TIMEOUT_SECS must be a number of seconds")?,
            ),
            generation_model: env_or("GENERATION_MODEL", ollama::DEFAULT_MODEL),
            embedding_model: env_or("EMBEDDING_MODEL", ollama::DEFAULT_EMBEDDING_MODEL),
        })
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            ollama_host: self.ollama_host.clone(),
            openai_base_url: self.openai_base_url.clone(),
            moonshot_base_url: self.moonshot_base_url.clone(),
            moonshot_enabled: self.enable_moonshot_provider,
            timeout: self.provider_timeout,
            worker_limit: self.provider_worker_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            ollama_host: ollama::DEFAULT_HOST.to_string(),
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            moonshot_base_url: moonshot::DEFAULT_BASE_URL.to_string(),
            enable_moonshot_provider: false,
            provider_worker_limit: DEFAULT_WORKER_LIMIT,
            provider_timeout: Duration::from_secs(60),
            generation_model: ollama::DEFAULT_MODEL.to_string(),
            embedding_model: ollama::DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("RESUME_API_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_API_TEST_BAD_LIMIT", "lots");
        let result: Result<usize> = parse_env("RESUME_API_TEST_BAD_LIMIT", 8);
        assert!(result.is_err());
        std::env::remove_var("RESUME_API_TEST_BAD_LIMIT");
    }

    #[test]
    fn test_parse_env_bool() {
        std::env::set_var("RESUME_API_TEST_FLAG", "true");
        let flag: bool = parse_env("RESUME_API_TEST_FLAG", false).unwrap();
        assert!(flag);
        std::env::remove_var("RESUME_API_TEST_FLAG");
    }

    #[test]
    fn test_resolver_config_mirrors_settings() {
        let config = Config {
            enable_moonshot_provider: true,
            provider_worker_limit: 3,
            ollama_host: "http://gpu-box:11434".to_string(),
            ..Default::default()
        };
        let rc = config.resolver_config();
        assert!(rc.moonshot_enabled);
        assert_eq!(rc.worker_limit, 3);
        assert_eq!(rc.ollama_host, "http://gpu-box:11434");
        assert_eq!(rc.timeout, Duration::from_secs(60));
    }
}
