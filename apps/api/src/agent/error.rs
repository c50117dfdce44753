use thiserror::Error;

use crate::agent::providers::Vendor;

/// Every failure the agent layer can surface. Nothing here is retried.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The requested model is not installed on the local runner.
    #[error(
        "{vendor} model '{model}' is not found. Run `ollama pull {model}` \
         or pick from any available models {available:?}"
    )]
    Configuration {
        vendor: Vendor,
        model: String,
        available: Vec<String>,
    },

    /// Transport failure, non-2xx status, malformed body, missing credential
    /// or a worker task that died.
    #[error("{vendor} - {message}")]
    Provider {
        vendor: Vendor,
        status: Option<u16>,
        message: String,
    },

    /// The JSON strategy received output that does not parse.
    #[error("JSON parsing error: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl AgentError {
    pub(crate) fn provider(vendor: Vendor, message: impl Into<String>) -> Self {
        AgentError::Provider {
            vendor,
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn http_status(vendor: Vendor, status: u16, body: String) -> Self {
        AgentError::Provider {
            vendor,
            status: Some(status),
            message: format!("API returned {status}: {body}"),
        }
    }

    /// HTTP status reported by the vendor, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AgentError::Provider { status, .. } => *status,
            _ => None,
        }
    }
}
