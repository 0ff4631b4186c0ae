use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::gateways::{TextExtractor, Transcriber};
use crate::llm_client::LlmGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// LLM gateway behind a trait object so tests can script responses.
    pub llm: Arc<dyn LlmGateway>,
    pub extractor: Arc<dyn TextExtractor>,
    pub transcriber: Arc<dyn Transcriber>,
    /// Kept on state so handlers gain config access without replumbing.
    #[allow(dead_code)]
    pub config: Config,
}
