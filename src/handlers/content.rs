// src/handlers/content.rs
//! Content generation endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ERROR_SENTINEL};
use crate::file_parser::parse_file_content;
use crate::models::content::{
    GenerateRequest, GenerateResponse, WorkflowInfoResponse, MAX_PROMPT_CHARS, MIN_PROMPT_CHARS,
};
use crate::workflow::RunOptions;
use crate::AppState;

const GENERATION_FAILED: &str = "Content generation failed. Please try again.";

fn validate_prompt(prompt: &str) -> Result<(), ApiError> {
    let chars = prompt.chars().count();
    if chars < MIN_PROMPT_CHARS {
        return Err(ApiError::Validation("prompt must not be empty".to_string()));
    }
    if chars > MAX_PROMPT_CHARS {
        return Err(ApiError::Validation(format!(
            "prompt must be at most {} characters, got {}",
            MAX_PROMPT_CHARS, chars
        )));
    }
    Ok(())
}

/// Parse an uploaded file into context text. Any failure is logged and the
/// request continues without context.
async fn extract_context(file: Option<String>, file_type: Option<String>) -> String {
    let Some(encoded) = file.filter(|f| !f.trim().is_empty()) else {
        return String::new();
    };

    // PDF parsing is CPU bound and may panic on malformed input.
    let parsed = tokio::task::spawn_blocking(move || {
        parse_file_content(&encoded, file_type.as_deref())
    })
    .await;

    match parsed {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            tracing::info!("📄 File parsed into {} chars of context", text.len());
            text
        }
        Ok(Ok(_)) => {
            tracing::warn!("Uploaded file contained no text, continuing without context");
            String::new()
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to parse uploaded file ({}), continuing without context", e);
            String::new()
        }
        Err(e) => {
            tracing::warn!("File parser aborted ({}), continuing without context", e);
            String::new()
        }
    }
}

/// POST /content/generate
pub async fn generate_content(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    validate_prompt(&request.prompt)?;

    let context = extract_context(request.file, request.file_type).await;
    let result = state
        .workflow
        .run(&request.prompt, &context, RunOptions::default())
        .await;

    if result.content.trim().is_empty() || result.content.starts_with(ERROR_SENTINEL) {
        tracing::error!("Content generation failed: {}", result.content);
        return Err(ApiError::Generation(GENERATION_FAILED.to_string()));
    }

    tracing::info!(
        "✅ Generated {} chars using {} trends (context: {})",
        result.content.len(),
        result.trends_used.len(),
        result.context_processed
    );

    Ok(Json(GenerateResponse {
        content: result.content,
        image_url: result.image_url,
    }))
}

/// GET /content/workflow-info
pub async fn workflow_info(Extension(state): Extension<Arc<AppState>>) -> Json<WorkflowInfoResponse> {
    Json(WorkflowInfoResponse {
        status: "success",
        workflow: state.workflow.workflow_info(),
    })
}

pub fn content_routes() -> Router {
    Router::new()
        .route("/content/generate", post(generate_content))
        .route("/content/workflow-info", get(workflow_info))
}
