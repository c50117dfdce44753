//! Wire types shared by the OpenAI-compatible chat and embedding endpoints.

use serde::{Deserialize, Serialize};

use crate::agent::error::AgentError;
use crate::agent::providers::Vendor;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// System instruction (if any) first, then the user prompt.
pub(crate) fn messages(instructions: Option<&str>, prompt: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = instructions.filter(|s| !s.is_empty()) {
        messages.push(ChatMessage {
            role: "system",
            content: system.to_string(),
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt.to_string(),
    });
    messages
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first completion.
    pub fn into_text(self, vendor: Vendor) -> Result<String, AgentError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AgentError::provider(vendor, format!("No response choices returned from {vendor} API"))
        })?;
        choice
            .message
            .content
            .ok_or_else(|| AgentError::provider(vendor, "first choice has no content"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EmbeddingRequest {
    pub model: String,
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    pub fn into_vector(self, vendor: Vendor) -> Result<Vec<f32>, AgentError> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                AgentError::provider(
                    vendor,
                    format!("No embedding data returned from {vendor} API"),
                )
            })
    }
}
