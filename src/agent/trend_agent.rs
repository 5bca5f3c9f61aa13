// Trend agent - supplies the trend list the content stage builds on.
// Live data comes from a TrendSource; the static list backs every failure.

use crate::error::StageError;
use crate::trends_client::{KeywordInterest, TrendsClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Keywords queried against the live source.
pub const DEFAULT_KEYWORDS: [&str; 4] = [
    "marketing trends",
    "digital marketing",
    "content marketing",
    "social media marketing",
];

/// Keywords strictly above this interest value count as trending.
pub const INTEREST_THRESHOLD: f64 = 50.0;

const FALLBACK_TRENDS: [&str; 10] = [
    "Sustainability and eco-friendly marketing",
    "AI-driven personalization",
    "Video content marketing",
    "Voice search optimization",
    "Social commerce integration",
    "Micro-influencer partnerships",
    "Interactive content experiences",
    "Data privacy compliance",
    "Omnichannel marketing strategies",
    "Local SEO and hyperlocal targeting",
];

/// External source of keyword interest scores.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn latest_interest(&self, keywords: &[&str]) -> Result<Vec<KeywordInterest>, String>;
}

#[async_trait]
impl TrendSource for TrendsClient {
    async fn latest_interest(&self, keywords: &[&str]) -> Result<Vec<KeywordInterest>, String> {
        TrendsClient::latest_interest(self, keywords).await
    }
}

pub struct TrendAgent {
    source: Option<Arc<dyn TrendSource>>,
}

impl TrendAgent {
    pub fn new(source: Option<Arc<dyn TrendSource>>) -> Self {
        if source.is_none() {
            tracing::warn!("No live trend source configured, trend lookups will use the static list");
        }
        Self { source }
    }

    pub fn has_live_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn fallback_trends() -> Vec<String> {
        FALLBACK_TRENDS.iter().map(|t| t.to_string()).collect()
    }

    /// Prompts asking about what is "trending" or "current" get live data.
    pub fn wants_live_trends(prompt: &str) -> bool {
        let lower = prompt.to_lowercase();
        lower.contains("trending") || lower.contains("current")
    }

    /// Fallible lookup. Errors are meant to be absorbed by the caller.
    pub async fn try_trends(&self, use_real_api: bool) -> Result<Vec<String>, StageError> {
        if !use_real_api {
            return Ok(Self::fallback_trends());
        }

        let source = self.source.as_ref().ok_or(StageError::SourceUnavailable)?;
        let interest = source
            .latest_interest(&DEFAULT_KEYWORDS)
            .await
            .map_err(StageError::Source)?;

        let trending: Vec<String> = interest
            .into_iter()
            .filter(|k| k.interest > INTEREST_THRESHOLD)
            .map(|k| format!("{} (trending)", k.keyword))
            .collect();

        if trending.is_empty() {
            return Err(StageError::LowSignal);
        }

        tracing::info!("📈 Retrieved {} trending keywords from live source", trending.len());
        Ok(trending)
    }

    /// Never empty: any failure falls back to the static list.
    pub async fn get_trends(&self, use_real_api: bool) -> Vec<String> {
        match self.try_trends(use_real_api).await {
            Ok(trends) => trends,
            Err(e) => {
                tracing::warn!("Trend lookup failed ({}), using fallback trends", e);
                Self::fallback_trends()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedSource(pub Result<Vec<KeywordInterest>, String>);

    #[async_trait]
    impl TrendSource for FixedSource {
        async fn latest_interest(&self, _keywords: &[&str]) -> Result<Vec<KeywordInterest>, String> {
            self.0.clone()
        }
    }

    fn interest(keyword: &str, value: f64) -> KeywordInterest {
        KeywordInterest { keyword: keyword.to_string(), interest: value }
    }

    #[test]
    fn test_fallback_list() {
        let trends = TrendAgent::fallback_trends();
        assert_eq!(trends.len(), 10);
        assert_eq!(trends[0], "Sustainability and eco-friendly marketing");
    }

    #[test]
    fn test_live_keyword_detection() {
        assert!(TrendAgent::wants_live_trends("What is TRENDING in sneakers?"));
        assert!(TrendAgent::wants_live_trends("current coffee promos"));
        assert!(!TrendAgent::wants_live_trends("Launch shoes"));
    }

    #[tokio::test]
    async fn test_static_mode_ignores_source() {
        let agent = TrendAgent::new(Some(Arc::new(FixedSource(Err("down".into())))));
        assert_eq!(agent.get_trends(false).await, TrendAgent::fallback_trends());
    }

    #[tokio::test]
    async fn test_threshold_filters_keywords() {
        let agent = TrendAgent::new(Some(Arc::new(FixedSource(Ok(vec![
            interest("digital marketing", 72.0),
            interest("content marketing", 50.0),
            interest("marketing trends", 51.0),
        ])))));

        let trends = agent.try_trends(true).await.unwrap();
        assert_eq!(
            trends,
            vec!["digital marketing (trending)", "marketing trends (trending)"]
        );
    }

    #[tokio::test]
    async fn test_failures_fall_back() {
        let cases: Vec<Option<Arc<dyn TrendSource>>> = vec![
            None,
            Some(Arc::new(FixedSource(Err("connection refused".into()))) as Arc<dyn TrendSource>),
            Some(Arc::new(FixedSource(Ok(vec![interest("digital marketing", 12.0)]))) as Arc<dyn TrendSource>),
            Some(Arc::new(FixedSource(Ok(vec![]))) as Arc<dyn TrendSource>),
        ];

        for source in cases {
            let agent = TrendAgent::new(source);
            let trends = agent.get_trends(true).await;
            assert!(!trends.is_empty());
            assert_eq!(trends, TrendAgent::fallback_trends());
        }
    }

    #[tokio::test]
    async fn test_try_trends_reports_reason() {
        let agent = TrendAgent::new(None);
        assert_eq!(agent.try_trends(true).await, Err(StageError::SourceUnavailable));

        let agent = TrendAgent::new(Some(Arc::new(FixedSource(Ok(vec![interest("x", 1.0)])))));
        assert_eq!(agent.try_trends(true).await, Err(StageError::LowSignal));
    }
}
