use std::sync::Arc;

use marketing_content::config::Settings;
use marketing_content::{app_router, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();

    init_logging(&settings).expect("Failed to initialize logging");

    if settings.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, content will be generated from the built-in template");
    }
    if settings.serpapi_api_key.is_none() {
        tracing::warn!("SERPAPI_API_KEY not set, live trends are disabled");
    }

    let bind_addr = settings.bind_addr;
    let shared_state = Arc::new(AppState::new(settings));
    let app = app_router(shared_state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("🚀 Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>())
        .await
        .expect("Server error");
}

fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| settings.tracing_filter());

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_filter))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        // JSON logging for log aggregation
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(settings.debug)
            .with_line_number(settings.debug)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("📣 {} starting up...", settings.app_name);
    tracing::info!("Version: {}", settings.app_version);
    tracing::info!("Log filter: {}", log_filter);
    tracing::info!(
        "Configuration - OpenAI: {}, Google Trends: {}, Debug: {}",
        if settings.openai_api_key.is_some() { "✅" } else { "❌" },
        if settings.serpapi_api_key.is_some() { "✅" } else { "❌" },
        settings.debug
    );

    Ok(())
}
