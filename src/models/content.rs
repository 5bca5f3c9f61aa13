// src/models/content.rs
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowInfo;

pub const MIN_PROMPT_CHARS: usize = 1;
pub const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Base64-encoded CSV or PDF whose text becomes generation context.
    #[serde(default)]
    pub file: Option<String>,
    /// Optional "csv" / "pdf" hint; sniffed from the bytes when absent.
    #[serde(default)]
    pub file_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkflowInfoResponse {
    pub status: &'static str,
    pub workflow: WorkflowInfo,
}
