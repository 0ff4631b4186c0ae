use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::analysis::assembler::{analyze_deck, analyze_video, generate_investor_qa};
use crate::errors::AppError;
use crate::models::analysis::{DeckAnalysis, VideoAnalysis};
use crate::models::ids::{DeckId, UserId, VideoId};
use crate::models::pitch::{PitchDeckRow, PitchVideoRow};
use crate::models::qa::InvestorQa;
use crate::repo::analyses::{DeckAnalysisRepo, VideoAnalysisRepo};
use crate::repo::pitches::{PitchDeckRepo, PitchVideoRepo};
use crate::repo::qa::InvestorQaRepo;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: UserId,
}

#[derive(Deserialize)]
pub struct AnalyzeDeckRequest {
    pub user_id: UserId,
    pub title: String,
    /// Pre-extracted deck text. Takes precedence over `file_url`.
    pub text: Option<String>,
    /// PDF location (URL or local path) to extract text from.
    pub file_url: Option<String>,
}

/// POST /api/v1/analyses/deck
pub async fn handle_analyze_deck(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeDeckRequest>,
) -> Result<Json<DeckAnalysis>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let text = match (&req.text, &req.file_url) {
        (Some(text), _) if !text.trim().is_empty() => text.clone(),
        (_, Some(file_url)) => state.extractor.extract_text(file_url).await?,
        _ => {
            return Err(AppError::Validation(
                "either text or file_url is required".to_string(),
            ))
        }
    };

    let deck = PitchDeckRow {
        id: DeckId::new(),
        user_id: req.user_id,
        title: req.title.clone(),
        file_url: req.file_url.clone(),
        extracted_text: None,
        status: "processing".to_string(),
        created_at: Utc::now(),
    };
    let decks = PitchDeckRepo::new(state.db.clone());
    decks.insert(&deck).await?;

    let result: Result<DeckAnalysis, AppError> = async {
        let analysis = analyze_deck(state.llm.as_ref(), deck.id, &req.title, &text).await?;
        DeckAnalysisRepo::new(state.db.clone())
            .insert(&analysis)
            .await?;
        decks.mark_completed(deck.id, &text).await?;
        Ok(analysis)
    }
    .await;

    match result {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            // Never leave the row stuck in 'processing'.
            if let Err(mark_err) = decks.mark_failed(deck.id).await {
                warn!("Could not mark deck {} failed: {mark_err}", deck.id);
            }
            Err(e)
        }
    }
}

#[derive(Deserialize)]
pub struct AnalyzeVideoRequest {
    pub user_id: UserId,
    pub title: String,
    /// Pre-existing transcript. Takes precedence over `audio_url`.
    pub transcript: Option<String>,
    /// Audio/video location to download and transcribe.
    pub audio_url: Option<String>,
    pub duration_seconds: u32,
}

/// POST /api/v1/analyses/video
pub async fn handle_analyze_video(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeVideoRequest>,
) -> Result<Json<VideoAnalysis>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let transcript = match (&req.transcript, &req.audio_url) {
        (Some(transcript), _) if !transcript.trim().is_empty() => transcript.clone(),
        (_, Some(audio_url)) => {
            let bytes = reqwest::get(audio_url)
                .await
                .map_err(|e| AppError::Transcription(format!("fetch {audio_url}: {e}")))?
                .error_for_status()
                .map_err(|e| AppError::Transcription(format!("fetch {audio_url}: {e}")))?
                .bytes()
                .await
                .map_err(|e| AppError::Transcription(format!("read {audio_url}: {e}")))?;
            state.transcriber.transcribe(bytes).await?
        }
        _ => {
            return Err(AppError::Validation(
                "either transcript or audio_url is required".to_string(),
            ))
        }
    };

    let video = PitchVideoRow {
        id: VideoId::new(),
        user_id: req.user_id,
        title: req.title.clone(),
        file_url: req.audio_url.clone(),
        transcript: None,
        duration_seconds: req.duration_seconds as i32,
        status: "processing".to_string(),
        created_at: Utc::now(),
    };
    let videos = PitchVideoRepo::new(state.db.clone());
    videos.insert(&video).await?;

    let result: Result<VideoAnalysis, AppError> = async {
        let analysis =
            analyze_video(state.llm.as_ref(), video.id, &transcript, req.duration_seconds).await?;
        VideoAnalysisRepo::new(state.db.clone())
            .insert(&analysis)
            .await?;
        videos.mark_completed(video.id, &transcript).await?;
        Ok(analysis)
    }
    .await;

    match result {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            // Never leave the row stuck in 'processing'.
            if let Err(mark_err) = videos.mark_failed(video.id).await {
                warn!("Could not mark video {} failed: {mark_err}", video.id);
            }
            Err(e)
        }
    }
}

/// GET /api/v1/decks
pub async fn handle_list_decks(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PitchDeckRow>>, AppError> {
    let decks = PitchDeckRepo::new(state.db.clone())
        .list_for_user(params.user_id)
        .await?;
    Ok(Json(decks))
}

/// GET /api/v1/videos
pub async fn handle_list_videos(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PitchVideoRow>>, AppError> {
    let videos = PitchVideoRepo::new(state.db.clone())
        .list_for_user(params.user_id)
        .await?;
    Ok(Json(videos))
}

#[derive(Deserialize)]
pub struct GenerateQaRequest {
    pub user_id: UserId,
    pub deck_id: Option<DeckId>,
    pub video_id: Option<VideoId>,
    /// Direct deck text; when absent, resolved from the stored deck row.
    pub deck_text: Option<String>,
    /// Direct transcript; when absent, resolved from the stored video row.
    pub video_transcript: Option<String>,
}

/// POST /api/v1/qa
pub async fn handle_generate_qa(
    State(state): State<AppState>,
    Json(req): Json<GenerateQaRequest>,
) -> Result<Json<InvestorQa>, AppError> {
    let deck_text = match (&req.deck_text, req.deck_id) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(deck_id)) => PitchDeckRepo::new(state.db.clone())
            .get(deck_id)
            .await?
            .and_then(|d| d.extracted_text),
        (None, None) => None,
    };
    let video_transcript = match (&req.video_transcript, req.video_id) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(video_id)) => PitchVideoRepo::new(state.db.clone())
            .get(video_id)
            .await?
            .and_then(|v| v.transcript),
        (None, None) => None,
    };

    let qa = generate_investor_qa(
        state.llm.as_ref(),
        req.user_id,
        req.deck_id,
        req.video_id,
        deck_text.as_deref(),
        video_transcript.as_deref(),
    )
    .await?;

    InvestorQaRepo::new(state.db.clone()).insert(&qa).await?;

    Ok(Json(qa))
}

/// GET /api/v1/qa
pub async fn handle_list_qa(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InvestorQa>>, AppError> {
    let sets = InvestorQaRepo::new(state.db.clone())
        .list_for_user(params.user_id)
        .await?;
    Ok(Json(sets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::config::Config;
    use crate::gateways::{TextExtractor, Transcriber};
    use crate::llm_client::{LlmError, LlmGateway};

    struct FailingLlm;

    #[async_trait]
    impl LlmGateway for FailingLlm {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "quota exhausted".to_string(),
            })
        }
    }

    struct UnusedExtractor;

    #[async_trait]
    impl TextExtractor for UnusedExtractor {
        async fn extract_text(&self, _source: &str) -> Result<String, AppError> {
            Err(AppError::Extraction("not available in tests".to_string()))
        }
    }

    struct UnusedTranscriber;

    #[async_trait]
    impl Transcriber for UnusedTranscriber {
        async fn transcribe(&self, _audio: Bytes) -> Result<String, AppError> {
            Err(AppError::Transcription("not available in tests".to_string()))
        }
    }

    fn test_state(db: sqlx::PgPool) -> AppState {
        AppState {
            db,
            llm: Arc::new(FailingLlm),
            extractor: Arc::new(UnusedExtractor),
            transcriber: Arc::new(UnusedTranscriber),
            config: Config {
                database_url: String::new(),
                anthropic_api_key: String::new(),
                transcribe_url: String::new(),
                transcribe_api_key: String::new(),
                port: 0,
                rust_log: "info".to_string(),
                llm_max_attempts: 1,
            },
        }
    }

    /// Needs a running Postgres: set DATABASE_URL and run with `--ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_deck_row_marked_failed_when_llm_errors() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let db = crate::db::create_pool(&url).await.expect("pool");
        let state = test_state(db.clone());
        let user_id = UserId::new();

        let result = handle_analyze_deck(
            State(state),
            Json(AnalyzeDeckRequest {
                user_id,
                title: "Acme Seed Pitch".to_string(),
                text: Some("problem, solution, traction".to_string()),
                file_url: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Analysis(_))));

        let decks = PitchDeckRepo::new(db)
            .list_for_user(user_id)
            .await
            .expect("list decks");
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].status, "failed");
    }

    /// Needs a running Postgres: set DATABASE_URL and run with `--ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_video_row_marked_failed_when_llm_errors() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let db = crate::db::create_pool(&url).await.expect("pool");
        let state = test_state(db.clone());
        let user_id = UserId::new();

        let result = handle_analyze_video(
            State(state),
            Json(AnalyzeVideoRequest {
                user_id,
                title: "Acme Rehearsal".to_string(),
                transcript: Some("um so our revenue grew".to_string()),
                audio_url: None,
                duration_seconds: 30,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Analysis(_))));

        let videos = PitchVideoRepo::new(db)
            .list_for_user(user_id)
            .await
            .expect("list videos");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].status, "failed");
    }
}
