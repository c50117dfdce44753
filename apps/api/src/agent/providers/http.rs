//! Blocking HTTP helpers. Only ever called from inside a [`WorkerPool`] job.
//!
//! A client is built and dropped within each call; nothing is pooled across calls.
//!
//! [`WorkerPool`]: crate::agent::worker::WorkerPool

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::agent::error::AgentError;
use crate::agent::providers::Vendor;

/// POSTs `body` as JSON and decodes a JSON response.
pub(crate) fn post_json<B, R>(
    vendor: Vendor,
    url: &str,
    bearer: Option<&str>,
    body: &B,
    timeout: Duration,
) -> Result<R, AgentError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let client = build_client(vendor, timeout)?;
    let mut request = client.post(url).json(body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    debug!(vendor = %vendor, url, "sending provider request");
    execute(vendor, request)
}

/// GETs `url` and decodes a JSON response.
pub(crate) fn get_json<R>(vendor: Vendor, url: &str, timeout: Duration) -> Result<R, AgentError>
where
    R: DeserializeOwned,
{
    let client = build_client(vendor, timeout)?;
    debug!(vendor = %vendor, url, "sending provider request");
    execute(vendor, client.get(url))
}

fn build_client(vendor: Vendor, timeout: Duration) -> Result<Client, AgentError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AgentError::provider(vendor, format!("failed to build HTTP client: {e}")))
}

fn execute<R: DeserializeOwned>(vendor: Vendor, request: RequestBuilder) -> Result<R, AgentError> {
    let response = request
        .send()
        .map_err(|e| AgentError::provider(vendor, format!("HTTP error: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| AgentError::provider(vendor, format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        error!(vendor = %vendor, status = status.as_u16(), "provider returned {status}: {body}");
        return Err(AgentError::http_status(vendor, status.as_u16(), body));
    }

    if body.trim().is_empty() {
        return Err(AgentError::provider(vendor, "empty response body"));
    }

    serde_json::from_str(&body)
        .map_err(|e| AgentError::provider(vendor, format!("malformed response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const TIMEOUT: Duration = Duration::from_secs(5);

    // The blocking client panics when used from an async context.
    async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    #[tokio::test]
    async fn test_post_json_decodes_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/echo")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let url = format!("{}/echo", server.url());
        let value: Value = blocking(move || {
            post_json(Vendor::OpenAi, &url, Some("secret"), &json!({"a": 1}), TIMEOUT)
        })
        .await
        .unwrap();

        assert_eq!(value["ok"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/limited")
            .with_status(429)
            .with_body("Too many requests, retry later")
            .create_async()
            .await;

        let url = format!("{}/limited", server.url());
        let err = blocking(move || get_json::<Value>(Vendor::Moonshot, &url, TIMEOUT))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(429));
        let msg = err.to_string();
        assert!(msg.contains("Moonshot"));
        assert!(msg.contains("429"));
        assert!(msg.contains("Too many requests, retry later"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/garbage")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let url = format!("{}/garbage", server.url());
        let err = blocking(move || get_json::<Value>(Vendor::Ollama, &url, TIMEOUT))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("malformed response body"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_empty_body_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/empty")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let url = format!("{}/empty", server.url());
        let err = blocking(move || get_json::<Value>(Vendor::Ollama, &url, TIMEOUT))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("empty response body"));
    }

    #[tokio::test]
    async fn test_transport_error_names_vendor() {
        // Port 1 is never listening in test environments.
        let err = blocking(|| get_json::<Value>(Vendor::OpenAi, "http://127.0.0.1:1/x", TIMEOUT))
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.starts_with("OpenAI - HTTP error"), "got: {msg}");
    }
}
