use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::analysis::{DeckAnalysis, VideoAnalysis};
use crate::models::ids::{DeckId, ReportId, UserId, VideoId};
use crate::models::qa::InvestorQa;

/// A shareable pitch report combining up to one deck analysis, one video
/// analysis, and one investor Q&A set.
///
/// Invariant: `overall_score` is the mean of the overall scores of whichever
/// analyses are present, rounded to one decimal; 0.0 when neither is present.
///
/// Lifecycle: Draft (`is_shared = false`) → Shared (`is_shared = true`),
/// one-directional. After creation the only mutation is sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchReport {
    pub id: ReportId,
    pub user_id: UserId,
    pub deck_id: Option<DeckId>,
    pub video_id: Option<VideoId>,
    pub title: String,
    pub overall_score: f64,
    pub deck_analysis: Option<DeckAnalysis>,
    pub video_analysis: Option<VideoAnalysis>,
    pub investor_qa: Option<InvestorQa>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_shared: bool,
    pub share_token: Option<String>,
}
