pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::resume_generator::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resume-generator/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/resume-generator/preview/:resume_id",
            get(handlers::handle_preview),
        )
        .with_state(state)
        // SetRequestId runs first: an incoming X-Request-ID is kept, otherwise a UUID is generated.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::agent::{AgentManager, EmbeddingManager, ProviderResolver, ResolverConfig};
    use crate::config::Config;

    fn empty_env(_: &str) -> Option<String> {
        None
    }

    fn state_with_ollama(host: String) -> AppState {
        let resolver = Arc::new(ProviderResolver::new(ResolverConfig {
            ollama_host: host,
            ..Default::default()
        }));
        AppState {
            config: Config::default(),
            resume_agent: AgentManager::new(resolver.clone(), Some("md"), "gemma3:4b")
                .with_env_lookup(Arc::new(empty_env)),
            embedder: EmbeddingManager::with_defaults(resolver)
                .with_env_lookup(Arc::new(empty_env)),
        }
    }

    fn generate_body() -> Value {
        json!({
            "personal_info": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 555 0100"
            },
            "projects": [{
                "name": "tiny-kv", "description": "An embedded key-value store",
                "technologies": "Rust", "start_date": "2021-03", "end_date": "2021-09",
                "role": "Author"
            }],
            "skills": [{"category": "Languages", "skills": "Rust, Go", "proficiency": "expert"}]
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state_with_ollama("http://127.0.0.1:1".to_string()));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body = read_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let app = build_router(state_with_ollama("http://127.0.0.1:1".to_string()));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers()["x-request-id"], "trace-me");
    }

    #[tokio::test]
    async fn test_preview_placeholder() {
        let app = build_router(state_with_ollama("http://127.0.0.1:1".to_string()));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/resume-generator/preview/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["resume_id"], "abc");
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_skills() {
        let app = build_router(state_with_ollama("http://127.0.0.1:1".to_string()));
        let mut body = generate_body();
        body["skills"] = json!([]);

        let resp = app
            .oneshot(post_json("/api/v1/resume-generator/generate", &body))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_returns_markdown_from_local_runner() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": [{"name": "gemma3:4b"}]}"#)
            .create_async()
            .await;
        let generate = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "gemma3:4b",
                "options": {"temperature": 0.7, "num_predict": 3000}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"response": "# Jane Doe\n\n## Skills\n- Rust", "done": true}"##)
            .create_async()
            .await;

        let app = build_router(state_with_ollama(server.url()));
        let resp = app
            .oneshot(post_json("/api/v1/resume-generator/generate", &generate_body()))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["markdown_content"], "# Jane Doe\n\n## Skills\n- Rust");
        assert_eq!(body["status"], "success");
        assert!(body["pdf_url"].is_null());
        assert!(!body["resume_id"].as_str().unwrap().is_empty());
        generate.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_reports_missing_local_model() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": []}"#)
            .create_async()
            .await;

        let app = build_router(state_with_ollama(server.url()));
        let resp = app
            .oneshot(post_json("/api/v1/resume-generator/generate", &generate_body()))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_json(resp).await;
        assert_eq!(body["error"]["code"], "PROVIDER_NOT_CONFIGURED");
    }
}
