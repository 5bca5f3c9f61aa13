// src/handlers/trends.rs
use axum::{extract::Extension, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::agent::trend_agent::TrendAgent;
use crate::models::trends::{
    LiveTrendsResponse, TrendStatusResponse, TrendsResponse, SOURCE_LIVE, SOURCE_MOCK,
};
use crate::AppState;

/// GET /trends - static trend list
pub async fn get_trends(Extension(state): Extension<Arc<AppState>>) -> Json<TrendsResponse> {
    Json(TrendsResponse {
        trends: state.trend_agent.get_trends(false).await,
    })
}

/// GET /trends/real - live lookup, falling back to the static list
pub async fn get_real_trends(Extension(state): Extension<Arc<AppState>>) -> Json<LiveTrendsResponse> {
    let trends = state.trend_agent.get_trends(true).await;
    let source = if state.trend_agent.has_live_source() {
        SOURCE_LIVE
    } else {
        SOURCE_MOCK
    };

    Json(LiveTrendsResponse {
        status: "success",
        count: trends.len(),
        trends,
        source,
    })
}

/// GET /trends/status
pub async fn trends_status(Extension(state): Extension<Arc<AppState>>) -> Json<TrendStatusResponse> {
    Json(TrendStatusResponse {
        status: "operational",
        live_source_available: state.trend_agent.has_live_source(),
        fallback_trends_count: TrendAgent::fallback_trends().len(),
        service: "trend_analysis",
    })
}

pub fn trend_routes() -> Router {
    Router::new()
        .route("/trends", get(get_trends))
        .route("/trends/real", get(get_real_trends))
        .route("/trends/status", get(trends_status))
}
