// src/models/trends.rs
use serde::Serialize;

pub const SOURCE_LIVE: &str = "google_trends";
pub const SOURCE_MOCK: &str = "mock_data";

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LiveTrendsResponse {
    pub status: &'static str,
    pub trends: Vec<String>,
    pub source: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TrendStatusResponse {
    pub status: &'static str,
    pub live_source_available: bool,
    pub fallback_trends_count: usize,
    pub service: &'static str,
}
