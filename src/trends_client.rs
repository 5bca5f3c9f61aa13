// src/trends_client.rs
//! Google Trends interest-over-time lookups through SerpApi's `google_trends` engine.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::DEFAULT_TRENDS_BASE_URL;

#[derive(Debug, Clone)]
pub struct TrendsClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeframe: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TrendsResponse {
    pub interest_over_time: Option<InterestOverTime>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InterestOverTime {
    #[serde(default)]
    pub timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimelinePoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub values: Vec<QueryValue>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueryValue {
    pub query: String,
    #[serde(default)]
    pub extracted_value: f64,
}

/// Interest score of one keyword at the most recent point of the timeframe.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordInterest {
    pub keyword: String,
    pub interest: f64,
}

impl TrendsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_TRENDS_BASE_URL.to_string(),
            timeframe: "today 3-m".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Latest interest value per keyword (0-100 scale).
    pub async fn latest_interest(&self, keywords: &[&str]) -> Result<Vec<KeywordInterest>, String> {
        if keywords.is_empty() {
            return Err("No keywords supplied".to_string());
        }

        let query = keywords.join(",");
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", "google_trends"),
                ("q", query.as_str()),
                ("date", self.timeframe.as_str()),
                ("data_type", "TIMESERIES"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("Request error: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Trends API error ({}): {}", status, body);
            return Err(format!("API error ({}): {}", status, body));
        }

        let payload: TrendsResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse trends response: {}", e))?;

        if let Some(message) = payload.error {
            return Err(format!("API error: {}", message));
        }

        let latest = payload
            .interest_over_time
            .and_then(|iot| iot.timeline_data.into_iter().last())
            .ok_or_else(|| "No timeline data in trends response".to_string())?;

        info!("Fetched trend interest for {} keywords at {}", latest.values.len(), latest.date);

        Ok(latest
            .values
            .into_iter()
            .map(|v| KeywordInterest {
                keyword: v.query,
                interest: v.extracted_value,
            })
            .collect())
    }
}
