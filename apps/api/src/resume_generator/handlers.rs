//! Axum route handlers for the resume generator API.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::agent::RunOptions;
use crate::errors::AppError;
use crate::resume_generator::models::{
    ResumeGenerationRequest, ResumeGenerationResponse, ResumePreviewResponse,
};
use crate::resume_generator::prompts::{build_resume_prompt, RESUME_SYSTEM};
use crate::state::AppState;

const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_LENGTH: u32 = 3000;

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// POST /api/v1/resume-generator/generate
///
/// Turns the submitted profile into a Markdown resume. The provider is
/// resolved from the environment on every call.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ResumeGenerationRequest>,
) -> Result<Json<ResumeGenerationResponse>, AppError> {
    let request_id = request_id(&headers).to_string();
    request.validate()?;

    info!(
        request_id = %request_id,
        name = %request.personal_info.name,
        projects = request.projects.len(),
        "Generating resume"
    );

    let prompt = build_resume_prompt(&request);
    let options = RunOptions {
        temperature: Some(GENERATION_TEMPERATURE),
        max_length: Some(GENERATION_MAX_LENGTH),
        instructions: Some(RESUME_SYSTEM.to_string()),
        ..Default::default()
    };

    let output = match state.resume_agent.run(&prompt, options).await {
        Ok(output) => output,
        Err(e) => {
            error!(request_id = %request_id, "Resume generation failed: {e}");
            return Err(e.into());
        }
    };

    let markdown_content = output.into_markdown().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "resume agent returned structured output instead of Markdown"
        ))
    })?;

    let resume_id = Uuid::new_v4().to_string();
    info!(
        request_id = %request_id,
        resume_id = %resume_id,
        chars = markdown_content.chars().count(),
        "Resume generated"
    );

    Ok(Json(ResumeGenerationResponse {
        resume_id,
        markdown_content,
        pdf_url: None,
        status: "success".to_string(),
        message: "Resume generated successfully".to_string(),
    }))
}

/// GET /api/v1/resume-generator/preview/:resume_id
///
/// Resumes are not stored, so this only echoes the id back.
pub async fn handle_preview(Path(resume_id): Path<String>) -> Json<ResumePreviewResponse> {
    Json(ResumePreviewResponse {
        resume_id,
        status: "success".to_string(),
        message: "Preview is not available yet".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_falls_back_to_dash() {
        assert_eq!(request_id(&HeaderMap::new()), "-");

        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }

    #[tokio::test]
    async fn test_preview_echoes_id() {
        let Json(body) = handle_preview(Path("r-42".to_string())).await;
        assert_eq!(body.resume_id, "r-42");
        assert_eq!(body.status, "success");
    }
}
