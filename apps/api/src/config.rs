use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Whisper-style transcription endpoint. Audio bytes are POSTed as the body.
    pub transcribe_url: String,
    pub transcribe_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Total attempts per LLM call. 1 = single attempt, no retry (the default
    /// pipeline contract). Raise for production deployments that want bounded
    /// retry with backoff.
    pub llm_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            transcribe_url: require_env("TRANSCRIBE_URL")?,
            transcribe_api_key: require_env("TRANSCRIBE_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_max_attempts: std::env::var("LLM_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
