use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ids::{DeckId, VideoId};

/// One scored analysis category with its free-form feedback line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub feedback: String,
}

/// Speech-pace category. `words_per_minute` is computed deterministically
/// from the transcript and duration, never taken from the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechPace {
    pub score: f64,
    pub words_per_minute: u32,
    pub feedback: String,
}

/// Filler-word category. `count` and `percentage` come from the deterministic
/// lexical counter; only `score` and `feedback` come from the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerWords {
    pub count: u32,
    pub percentage: f64,
    pub feedback: String,
}

/// Structured analysis of a pitch deck.
///
/// Invariant: `overall_score` is the mean of the three category scores,
/// rounded to one decimal. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckAnalysis {
    pub id: Uuid,
    pub deck_id: DeckId,
    pub overall_score: f64,
    pub clarity: CategoryScore,
    pub storytelling: CategoryScore,
    pub flow: CategoryScore,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub actionable_recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Structured analysis of a pitch video's delivery.
///
/// Invariant: `overall_score` is the mean of the four category scores
/// (pace, filler, confidence, tone), rounded to one decimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub id: Uuid,
    pub video_id: VideoId,
    pub overall_score: f64,
    pub speech_pace: SpeechPace,
    pub filler_words: FillerWords,
    pub confidence: CategoryScore,
    pub tone: CategoryScore,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub actionable_recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}
