// src/handlers/analyze.rs
//! Sentiment analysis endpoints

use axum::{
    extract::rejection::JsonRejection,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::error::ApiError;
use crate::models::analysis::{
    AnalysisHealthResponse, AnalyzeRequest, AnalyzeResponse, DetailedAnalysisResponse,
    MAX_CONTENT_CHARS, MIN_CONTENT_CHARS,
};
use crate::sentiment::{analyze_sentiment, sentiment_details, SentimentLabel};

const HEALTH_CHECK_TEXT: &str = "This is a great product with excellent features!";

fn validated_content(payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let chars = request.content.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Content too short (minimum {} characters)",
            MIN_CONTENT_CHARS
        )));
    }
    if chars > MAX_CONTENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Content too long (maximum {} characters)",
            MAX_CONTENT_CHARS
        )));
    }
    Ok(request.content)
}

/// POST /analyze
pub async fn analyze_content(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let content = validated_content(payload)?;
    let (sentiment, label) = analyze_sentiment(&content);

    Ok(Json(AnalyzeResponse {
        sentiment,
        sentiment_label: label.as_str(),
    }))
}

/// POST /analyze/detailed
pub async fn analyze_detailed(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<DetailedAnalysisResponse>, ApiError> {
    let content = validated_content(payload)?;
    let analysis = sentiment_details(&content);
    tracing::info!(
        "Detailed analysis: polarity {:.3}, subjectivity {:.3}",
        analysis.polarity,
        analysis.subjectivity
    );

    Ok(Json(DetailedAnalysisResponse {
        status: "success",
        content_length: content.chars().count(),
        analysis,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /analyze/health - scores a fixed positive sentence
pub async fn analysis_health() -> Json<AnalysisHealthResponse> {
    let (sentiment, label) = analyze_sentiment(HEALTH_CHECK_TEXT);
    let status = if label == SentimentLabel::Positive {
        "healthy"
    } else {
        tracing::warn!("Sentiment self-test scored {} as {}", HEALTH_CHECK_TEXT, label.as_str());
        "degraded"
    };

    Json(AnalysisHealthResponse {
        status,
        service: "sentiment_analysis",
        test_result: AnalyzeResponse {
            sentiment,
            sentiment_label: label.as_str(),
        },
    })
}

pub fn analyze_routes() -> Router {
    Router::new()
        .route("/analyze", post(analyze_content))
        .route("/analyze/detailed", post(analyze_detailed))
        .route("/analyze/health", get(analysis_health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn body(content: &str) -> Result<Json<AnalyzeRequest>, JsonRejection> {
        Ok(Json(AnalyzeRequest {
            content: content.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_positive_copy() {
        let Json(response) = analyze_content(body("Our new sneakers are excellent and comfortable."))
            .await
            .unwrap();
        assert_eq!(response.sentiment_label, "Positive");
        assert!(response.sentiment > 0.1 && response.sentiment <= 1.0);
    }

    #[tokio::test]
    async fn test_length_bounds() {
        let err = analyze_content(body("too short")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = analyze_content(body(&"a".repeat(MAX_CONTENT_CHARS + 1)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        assert!(analyze_content(body("ten chars!")).await.is_ok());
    }

    #[tokio::test]
    async fn test_detailed_analysis() {
        let Json(response) = analyze_detailed(body("The checkout is awful and the delivery was terrible."))
            .await
            .unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.analysis.label, SentimentLabel::Negative);
        assert_eq!(response.analysis.confidence, response.analysis.polarity.abs());
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_health_check_is_positive() {
        let Json(response) = analysis_health().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.test_result.sentiment_label, "Positive");
    }
}
