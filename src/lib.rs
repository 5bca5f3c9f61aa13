// lib.rs - service wiring: shared state and the HTTP router
pub mod agent;
pub mod config;
pub mod error;
pub mod file_parser;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openai_client;
pub mod sentiment;
pub mod trends_client;
pub mod workflow;

use axum::{
    extract::Extension,
    http::{HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use agent::content_agent::{ContentAgent, LanguageModel};
use agent::trend_agent::{TrendAgent, TrendSource};
use config::Settings;
use openai_client::OpenAiClient;
use trends_client::TrendsClient;
use workflow::ContentWorkflow;

// AppState holds the configuration, the trend agent (also used directly by the
// trends endpoints) and the content workflow.
pub struct AppState {
    pub settings: Settings,
    pub trend_agent: Arc<TrendAgent>,
    pub workflow: ContentWorkflow,
}

impl AppState {
    /// Outbound clients are only created when their API key is configured.
    pub fn new(settings: Settings) -> Self {
        let trend_source = settings.serpapi_api_key.clone().map(|key| {
            Arc::new(TrendsClient::new(key).with_base_url(settings.trends_base_url.clone()))
                as Arc<dyn TrendSource>
        });

        let model = settings.openai_api_key.clone().map(|key| {
            Arc::new(
                OpenAiClient::new(key)
                    .with_base_url(settings.openai_base_url.clone())
                    .with_model(settings.openai_model.clone()),
            ) as Arc<dyn LanguageModel>
        });

        Self::with_agents(
            settings,
            Arc::new(TrendAgent::new(trend_source)),
            Arc::new(ContentAgent::new(model)),
        )
    }

    pub fn with_agents(
        settings: Settings,
        trend_agent: Arc<TrendAgent>,
        content_agent: Arc<ContentAgent>,
    ) -> Self {
        let workflow = ContentWorkflow::new(trend_agent.clone(), content_agent);
        Self {
            settings,
            trend_agent,
            workflow,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router around the shared state.
pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(handlers::content::content_routes())
        .merge(handlers::trends::trend_routes())
        .merge(handlers::analyze::analyze_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/info", get(api_info))
        .nest(&state.settings.api_prefix, api)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(cors_layer(&state.settings.cors_origins))
        .layer(Extension(state))
}

/// GET / - welcome info
pub async fn root(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("Welcome to {}", state.settings.app_name),
        "version": state.settings.app_version,
        "health": "/health",
        "info": "/api/info",
    }))
}

/// GET /health
pub async fn health_check(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": state.settings.app_name,
        "version": state.settings.app_version,
    }))
}

/// GET /api/info - endpoint list and feature flags
pub async fn api_info(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    let prefix = &state.settings.api_prefix;
    Json(json!({
        "name": state.settings.app_name,
        "version": state.settings.app_version,
        "api_prefix": prefix,
        "endpoints": {
            "content_generation": format!("{prefix}/content/generate"),
            "workflow_info": format!("{prefix}/content/workflow-info"),
            "trends": format!("{prefix}/trends"),
            "real_trends": format!("{prefix}/trends/real"),
            "trends_status": format!("{prefix}/trends/status"),
            "sentiment_analysis": format!("{prefix}/analyze"),
            "detailed_analysis": format!("{prefix}/analyze/detailed"),
            "analysis_health": format!("{prefix}/analyze/health"),
        },
        "features": {
            "ai_content_generation": state.workflow.has_model(),
            "live_trends": state.trend_agent.has_live_source(),
            "file_context": ["csv", "pdf"],
            "sentiment_analysis": true,
        },
    }))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "detail": format!("No route for {}", uri.path()),
        })),
    )
}
