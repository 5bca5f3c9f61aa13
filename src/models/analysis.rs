// src/models/analysis.rs
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentDetails;

pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: f64,
    pub sentiment_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DetailedAnalysisResponse {
    pub status: &'static str,
    pub content_length: usize,
    pub analysis: SentimentDetails,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisHealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub test_result: AnalyzeResponse,
}
