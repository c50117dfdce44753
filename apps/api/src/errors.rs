use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agent::AgentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // The message only names models, so it is safe to return as-is.
            AppError::Agent(e @ AgentError::Configuration { .. }) => {
                tracing::error!("Provider configuration error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PROVIDER_NOT_CONFIGURED",
                    e.to_string(),
                )
            }
            AppError::Agent(e @ AgentError::Provider { .. }) => {
                tracing::error!("LLM provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_PROVIDER_ERROR",
                    "The AI provider failed to process the request".to_string(),
                )
            }
            AppError::Agent(e @ AgentError::InvalidJson(_)) => {
                tracing::error!("LLM output error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_INVALID_OUTPUT",
                    "The AI provider returned output that could not be parsed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
