// src/error.rs
//! Error types shared across the pipeline and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Prefix marking a content string that carries a failure instead of copy.
pub const ERROR_SENTINEL: &str = "Error:";

/// Failure of a single pipeline stage. Always absorbed at the stage boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StageError {
    #[error("live trend source is not configured")]
    SourceUnavailable,

    #[error("trend source error: {0}")]
    Source(String),

    #[error("trend source returned no high-interest keywords")]
    LowSignal,

    #[error("language model error: {0}")]
    Model(String),

    #[error("no prompt provided for content generation")]
    MissingPrompt,
}

/// Errors raised while building or walking the workflow graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("no entry point set")]
    NoEntryPoint,

    #[error("node '{0}' does not exist")]
    UnknownNode(String),

    #[error("graph contains a cycle through '{0}'")]
    Cycle(String),
}

/// Errors from decoding an uploaded file into context text.
#[derive(Debug, thiserror::Error)]
pub enum FileParseError {
    #[error("file content is empty")]
    Empty,

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("pdf error: {0}")]
    Pdf(String),
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Validation error",
            ApiError::BadRequest(_) => "Bad request",
            ApiError::Generation(_) => "Content generation failed",
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = %status.as_u16(), error = %self, "request rejected");
        }

        let body = json!({
            "error": self.label(),
            "detail": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
