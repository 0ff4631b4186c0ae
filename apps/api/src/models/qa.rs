use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ids::{DeckId, UserId, VideoId};

/// One simulated investor question with a suggested answer and delivery tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub suggested_answer: String,
    /// Quality of the suggested answer on a 1–10 scale.
    pub answer_quality: u8,
    pub tips: Vec<String>,
}

/// A generated investor Q&A set, referencing at most one deck and one video.
/// Holds at most 10 questions, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorQa {
    pub id: Uuid,
    pub user_id: UserId,
    pub deck_id: Option<DeckId>,
    pub video_id: Option<VideoId>,
    pub questions: Vec<QaItem>,
    pub created_at: DateTime<Utc>,
}
