// External capability gateways: document text extraction and audio
// transcription. Both are trait objects on AppState so tests and alternative
// backends can swap implementations without touching the pipeline code.

pub mod pdf_text;
pub mod transcription;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

/// Best-effort plain-text extraction from a document, given a URL or a local
/// file path. Fails with `AppError::Extraction` on unreadable documents.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, source: &str) -> Result<String, AppError>;
}

/// Best-effort transcription of audio/video bytes into plain text.
/// Fails with `AppError::Transcription`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes) -> Result<String, AppError>;
}
