// src/sentiment.rs
//! Sentiment scoring backed by the VADER lexicon.
//!
//! Polarity is VADER's compound score in [-1, 1]. Subjectivity is the share of
//! the text carrying sentiment at all (`1 - neu`), in [0, 1].

use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores above this are positive, below its negation negative.
pub const LABEL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDetails {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

pub fn sentiment_details(content: &str) -> SentimentDetails {
    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(content);

    let polarity = scores.get("compound").copied().unwrap_or(0.0).clamp(-1.0, 1.0);
    let neutral_share = scores.get("neu").copied().unwrap_or(1.0);
    let subjectivity = (1.0 - neutral_share).clamp(0.0, 1.0);

    SentimentDetails {
        polarity,
        subjectivity,
        label: SentimentLabel::from_polarity(polarity),
        confidence: polarity.abs(),
    }
}

/// Polarity score in [-1, 1] and its label.
pub fn analyze_sentiment(content: &str) -> (f64, SentimentLabel) {
    let details = sentiment_details(content);
    tracing::info!(
        "Sentiment analysis completed. Score: {:.3}, Label: {}",
        details.polarity,
        details.label.as_str()
    );
    (details.polarity, details.label)
}
