//! PDF text extraction backend.
//!
//! Remote documents are fetched into a tempfile first; extraction itself is
//! CPU-bound and runs inside `tokio::task::spawn_blocking`.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::errors::AppError;
use crate::gateways::TextExtractor;

pub struct PdfTextExtractor {
    client: Client,
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_to_tempfile(&self, url: &str) -> Result<tempfile::NamedTempFile, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Extraction(format!("fetch failed for {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Extraction(format!(
                "fetch failed for {url}: status {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Extraction(format!("fetch body failed for {url}: {e}")))?;

        let mut file = tempfile::NamedTempFile::new()
            .map_err(|e| AppError::Extraction(format!("tempfile creation failed: {e}")))?;
        file.write_all(&body)
            .map_err(|e| AppError::Extraction(format!("tempfile write failed: {e}")))?;

        Ok(file)
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, source: &str) -> Result<String, AppError> {
        // Keep the tempfile alive until extraction completes.
        let (_guard, path): (Option<tempfile::NamedTempFile>, PathBuf) =
            if source.starts_with("http://") || source.starts_with("https://") {
                let file = self.fetch_to_tempfile(source).await?;
                let path = file.path().to_path_buf();
                (Some(file), path)
            } else {
                (None, PathBuf::from(source))
            };

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            })?
            .map_err(|e| AppError::Extraction(format!("PDF extraction failed: {e}")))?;

        info!("Extracted {} chars from {source}", text.len());
        Ok(text)
    }
}
