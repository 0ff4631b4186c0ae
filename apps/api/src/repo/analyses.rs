use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::analysis::{DeckAnalysis, VideoAnalysis};
use crate::models::ids::{DeckId, VideoId};

pub struct DeckAnalysisRepo {
    pool: PgPool,
}

impl DeckAnalysisRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, analysis: &DeckAnalysis) -> Result<(), AppError> {
        let data = serde_json::to_value(analysis)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize DeckAnalysis: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO deck_analyses (id, deck_id, overall_score, data, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(analysis.id)
        .bind(analysis.deck_id)
        .bind(analysis.overall_score)
        .bind(&data)
        .bind(analysis.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn latest_for_deck(&self, deck_id: DeckId) -> Result<Option<DeckAnalysis>, AppError> {
        let data: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM deck_analyses WHERE deck_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(deck_id)
        .fetch_optional(&self.pool)
        .await?;

        data.map(|v| {
            serde_json::from_value(v)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("deserialize DeckAnalysis: {e}")))
        })
        .transpose()
    }
}

pub struct VideoAnalysisRepo {
    pool: PgPool,
}

impl VideoAnalysisRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, analysis: &VideoAnalysis) -> Result<(), AppError> {
        let data = serde_json::to_value(analysis)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize VideoAnalysis: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO video_analyses (id, video_id, overall_score, data, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(analysis.id)
        .bind(analysis.video_id)
        .bind(analysis.overall_score)
        .bind(&data)
        .bind(analysis.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn latest_for_video(
        &self,
        video_id: VideoId,
    ) -> Result<Option<VideoAnalysis>, AppError> {
        let data: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM video_analyses WHERE video_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        data.map(|v| {
            serde_json::from_value(v)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("deserialize VideoAnalysis: {e}")))
        })
        .transpose()
    }
}
