//! Report assembly pipeline.
//!
//! Flow: load latest analyses for the referenced deck/video → generate an
//! investor Q&A set from the stored source content → assemble the report
//! record → persist. Sharing is a separate, last-write-wins mutation.

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::assembler::generate_investor_qa;
use crate::analysis::round1;
use crate::errors::AppError;
use crate::llm_client::LlmGateway;
use crate::models::analysis::{DeckAnalysis, VideoAnalysis};
use crate::models::ids::{DeckId, ReportId, UserId, VideoId};
use crate::models::qa::InvestorQa;
use crate::models::report::PitchReport;
use crate::repo::analyses::{DeckAnalysisRepo, VideoAnalysisRepo};
use crate::repo::pitches::{PitchDeckRepo, PitchVideoRepo};
use crate::repo::qa::InvestorQaRepo;
use crate::repo::reports::ReportRepo;

/// Request body for report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReportRequest {
    pub user_id: UserId,
    pub title: String,
    pub deck_id: Option<DeckId>,
    pub video_id: Option<VideoId>,
}

/// Combines the given analyses and Q&A set into a report record.
///
/// `overall_score` is the rounded mean of the overall scores of whichever
/// analyses are present; 0.0 when neither is. Reports start unshared.
pub fn assemble(
    user_id: UserId,
    title: &str,
    deck_id: Option<DeckId>,
    video_id: Option<VideoId>,
    deck_analysis: Option<DeckAnalysis>,
    video_analysis: Option<VideoAnalysis>,
    investor_qa: Option<InvestorQa>,
) -> PitchReport {
    let scores: Vec<f64> = [
        deck_analysis.as_ref().map(|a| a.overall_score),
        video_analysis.as_ref().map(|a| a.overall_score),
    ]
    .into_iter()
    .flatten()
    .collect();

    let overall_score = if scores.is_empty() {
        0.0
    } else {
        round1(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    let now = Utc::now();

    PitchReport {
        id: ReportId::new(),
        user_id,
        deck_id,
        video_id,
        title: title.to_string(),
        overall_score,
        deck_analysis,
        video_analysis,
        investor_qa,
        created_at: now,
        updated_at: now,
        is_shared: false,
        share_token: None,
    }
}

/// Runs the full report pipeline and persists the result.
///
/// Steps:
/// 1. Load the latest deck/video analysis for the referenced sources.
/// 2. If either analysis exists, build a Q&A set from the stored deck text
///    and transcript. Missing source content skips Q&A with a warning.
/// 3. Assemble and persist the report.
pub async fn generate_pitch_report(
    pool: &PgPool,
    llm: &dyn LlmGateway,
    request: GenerateReportRequest,
) -> Result<PitchReport, AppError> {
    let deck_analysis = match request.deck_id {
        Some(deck_id) => {
            DeckAnalysisRepo::new(pool.clone())
                .latest_for_deck(deck_id)
                .await?
        }
        None => None,
    };

    let video_analysis = match request.video_id {
        Some(video_id) => {
            VideoAnalysisRepo::new(pool.clone())
                .latest_for_video(video_id)
                .await?
        }
        None => None,
    };

    let mut investor_qa = None;
    if deck_analysis.is_some() || video_analysis.is_some() {
        let deck_text = match request.deck_id {
            Some(deck_id) => PitchDeckRepo::new(pool.clone())
                .get(deck_id)
                .await?
                .and_then(|d| d.extracted_text),
            None => None,
        };
        let transcript = match request.video_id {
            Some(video_id) => PitchVideoRepo::new(pool.clone())
                .get(video_id)
                .await?
                .and_then(|v| v.transcript),
            None => None,
        };

        if deck_text.is_some() || transcript.is_some() {
            let qa = generate_investor_qa(
                llm,
                request.user_id,
                request.deck_id,
                request.video_id,
                deck_text.as_deref(),
                transcript.as_deref(),
            )
            .await?;
            InvestorQaRepo::new(pool.clone()).insert(&qa).await?;
            investor_qa = Some(qa);
        } else {
            warn!(
                "No stored source content for user {} — skipping Q&A generation",
                request.user_id
            );
        }
    }

    let report = assemble(
        request.user_id,
        &request.title,
        request.deck_id,
        request.video_id,
        deck_analysis,
        video_analysis,
        investor_qa,
    );

    ReportRepo::new(pool.clone()).insert(&report).await?;

    info!(
        "Generated report {} (overall {}) for user {}",
        report.id, report.overall_score, report.user_id
    );

    Ok(report)
}

/// Generates an opaque share token, unique per call.
pub fn new_share_token() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("share_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Marks a report shared and returns the new token.
///
/// NOT idempotent: sharing twice yields two different tokens and the
/// persisted record keeps only the latest (last write wins). `Shared` is
/// terminal — there is no unshare.
pub async fn share_report(repo: &ReportRepo, report_id: ReportId) -> Result<String, AppError> {
    let mut report = repo
        .get(report_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

    let token = new_share_token();
    report.is_shared = true;
    report.share_token = Some(token.clone());
    report.updated_at = Utc::now();

    repo.mark_shared(&report).await?;

    info!("Report {report_id} shared");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::models::analysis::{CategoryScore, FillerWords, SpeechPace};

    fn deck_analysis_scoring(overall: f64) -> DeckAnalysis {
        let category = CategoryScore {
            score: overall,
            feedback: "fine".to_string(),
        };
        DeckAnalysis {
            id: Uuid::new_v4(),
            deck_id: DeckId::new(),
            overall_score: overall,
            clarity: category.clone(),
            storytelling: category.clone(),
            flow: category,
            key_strengths: vec![],
            areas_for_improvement: vec![],
            actionable_recommendations: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn video_analysis_scoring(overall: f64) -> VideoAnalysis {
        let category = CategoryScore {
            score: overall,
            feedback: "fine".to_string(),
        };
        VideoAnalysis {
            id: Uuid::new_v4(),
            video_id: VideoId::new(),
            overall_score: overall,
            speech_pace: SpeechPace {
                score: overall,
                words_per_minute: 140,
                feedback: "fine".to_string(),
            },
            filler_words: FillerWords {
                count: 4,
                percentage: 3.0,
                feedback: "fine".to_string(),
            },
            confidence: category.clone(),
            tone: category,
            key_strengths: vec![],
            areas_for_improvement: vec![],
            actionable_recommendations: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_assemble_with_deck_only_uses_deck_score() {
        let report = assemble(
            UserId::new(),
            "Acme Seed Pitch",
            Some(DeckId::new()),
            None,
            Some(deck_analysis_scoring(8.0)),
            None,
            None,
        );
        assert_eq!(report.overall_score, 8.0);
    }

    #[test]
    fn test_assemble_with_both_analyses_averages() {
        let report = assemble(
            UserId::new(),
            "Acme Seed Pitch",
            Some(DeckId::new()),
            Some(VideoId::new()),
            Some(deck_analysis_scoring(8.0)),
            Some(video_analysis_scoring(6.0)),
            None,
        );
        assert_eq!(report.overall_score, 7.0);
    }

    #[test]
    fn test_assemble_with_neither_analysis_scores_zero() {
        let report = assemble(UserId::new(), "Empty", None, None, None, None, None);
        assert_eq!(report.overall_score, 0.0);
    }

    #[test]
    fn test_assemble_starts_unshared() {
        let report = assemble(UserId::new(), "Acme", None, None, None, None, None);
        assert!(!report.is_shared);
        assert!(report.share_token.is_none());
    }

    #[test]
    fn test_assemble_rounds_mean_to_one_decimal() {
        let report = assemble(
            UserId::new(),
            "Acme",
            Some(DeckId::new()),
            Some(VideoId::new()),
            Some(deck_analysis_scoring(8.3)),
            Some(video_analysis_scoring(7.0)),
            None,
        );
        // mean(8.3, 7.0) = 7.65 → 7.7
        assert_eq!(report.overall_score, 7.7);
    }

    #[test]
    fn test_share_tokens_are_unique_per_call() {
        let a = new_share_token();
        let b = new_share_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_share_token_format() {
        let token = new_share_token();
        assert!(token.starts_with("share_"));
        assert_eq!(token.split('_').count(), 3);
    }
}
