mod analysis;
mod config;
mod db;
mod errors;
mod gateways;
mod llm_client;
mod models;
mod repo;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::gateways::pdf_text::PdfTextExtractor;
use crate::gateways::transcription::HttpTranscriber;
use crate::llm_client::AnthropicClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PitchAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = Arc::new(AnthropicClient::new(
        config.anthropic_api_key.clone(),
        config.llm_max_attempts,
    ));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize capability gateways
    let extractor = Arc::new(PdfTextExtractor::new());
    let transcriber = Arc::new(HttpTranscriber::new(
        config.transcribe_url.clone(),
        config.transcribe_api_key.clone(),
    ));

    // Build app state
    let state = AppState {
        db,
        llm,
        extractor,
        transcriber,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
