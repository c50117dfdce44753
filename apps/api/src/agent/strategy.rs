use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::agent::error::AgentError;
use crate::agent::options::GenerationOptions;
use crate::agent::providers::Provider;

/// Post-processing applied to a raw generation result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the output as JSON; parse failures are errors.
    #[default]
    Json,
    /// Return the output byte-for-byte.
    Markdown,
}

impl Strategy {
    /// `"md"` selects Markdown; `"json"`, anything unknown, or no tag selects JSON.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("md") => Strategy::Markdown,
            _ => Strategy::Json,
        }
    }

    pub async fn apply(
        self,
        prompt: &str,
        provider: &dyn Provider,
        options: &GenerationOptions,
    ) -> Result<AgentOutput, AgentError> {
        let raw = provider.generate(prompt, options).await?;
        match self {
            Strategy::Markdown => Ok(AgentOutput::Markdown(raw)),
            Strategy::Json => {
                let value = serde_json::from_str(strip_json_fences(&raw)).map_err(|e| {
                    error!(vendor = %provider.vendor(), "JSON parsing error: {e}");
                    AgentError::InvalidJson(e)
                })?;
                Ok(AgentOutput::Json(value))
            }
        }
    }
}

/// Result of `AgentManager::run`: structured for the JSON strategy, text for Markdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentOutput {
    Json(Value),
    Markdown(String),
}

impl AgentOutput {
    pub fn into_json(self) -> Option<Value> {
        match self {
            AgentOutput::Json(value) => Some(value),
            AgentOutput::Markdown(_) => None,
        }
    }

    pub fn into_markdown(self) -> Option<String> {
        match self {
            AgentOutput::Markdown(text) => Some(text),
            AgentOutput::Json(_) => None,
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
