//! HTTP transcription backend.
//!
//! Posts raw audio bytes to a Whisper-style endpoint and reads the transcript
//! from the JSON response. Exactly one request per call — no retry.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::gateways::Transcriber;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

pub struct HttpTranscriber {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: Bytes) -> Result<String, AppError> {
        let byte_count = audio.len();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/octet-stream")
            .body(audio)
            .send()
            .await
            .map_err(|e| AppError::Transcription(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transcription(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transcription(format!("malformed response: {e}")))?;

        info!(
            "Transcribed {byte_count} bytes into {} chars",
            parsed.text.len()
        );
        Ok(parsed.text)
    }
}
