use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::ids::{DeckId, UserId, VideoId};

/// A submitted pitch deck. The file itself lives in external object storage;
/// this row carries the extracted text so report assembly never re-extracts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchDeckRow {
    pub id: DeckId,
    pub user_id: UserId,
    pub title: String,
    pub file_url: Option<String>,
    pub extracted_text: Option<String>,
    /// 'processing' | 'completed' | 'failed'
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A submitted pitch video. The transcript is stored at analysis time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchVideoRow {
    pub id: VideoId,
    pub user_id: UserId,
    pub title: String,
    pub file_url: Option<String>,
    pub transcript: Option<String>,
    pub duration_seconds: i32,
    /// 'processing' | 'completed' | 'failed'
    pub status: String,
    pub created_at: DateTime<Utc>,
}
