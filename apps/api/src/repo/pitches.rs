use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::ids::{DeckId, UserId, VideoId};
use crate::models::pitch::{PitchDeckRow, PitchVideoRow};

pub struct PitchDeckRepo {
    pool: PgPool,
}

impl PitchDeckRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, deck: &PitchDeckRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO pitch_decks (id, user_id, title, file_url, extracted_text, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(deck.id)
        .bind(deck.user_id)
        .bind(&deck.title)
        .bind(&deck.file_url)
        .bind(&deck.extracted_text)
        .bind(&deck.status)
        .bind(deck.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: DeckId) -> Result<Option<PitchDeckRow>, AppError> {
        let deck = sqlx::query_as::<_, PitchDeckRow>("SELECT * FROM pitch_decks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deck)
    }

    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<PitchDeckRow>, AppError> {
        let decks = sqlx::query_as::<_, PitchDeckRow>(
            "SELECT * FROM pitch_decks WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(decks)
    }

    /// Records the extracted text and moves the deck to 'completed'.
    pub async fn mark_completed(&self, id: DeckId, extracted_text: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE pitch_decks SET extracted_text = $2, status = 'completed' WHERE id = $1",
        )
        .bind(id)
        .bind(extracted_text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Moves the deck to 'failed' after an unrecoverable processing error.
    pub async fn mark_failed(&self, id: DeckId) -> Result<(), AppError> {
        sqlx::query("UPDATE pitch_decks SET status = 'failed' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PitchVideoRepo {
    pool: PgPool,
}

impl PitchVideoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, video: &PitchVideoRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO pitch_videos
                (id, user_id, title, file_url, transcript, duration_seconds, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.file_url)
        .bind(&video.transcript)
        .bind(video.duration_seconds)
        .bind(&video.status)
        .bind(video.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: VideoId) -> Result<Option<PitchVideoRow>, AppError> {
        let video = sqlx::query_as::<_, PitchVideoRow>("SELECT * FROM pitch_videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(video)
    }

    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<PitchVideoRow>, AppError> {
        let videos = sqlx::query_as::<_, PitchVideoRow>(
            "SELECT * FROM pitch_videos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }

    /// Records the transcript and moves the video to 'completed'.
    pub async fn mark_completed(&self, id: VideoId, transcript: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE pitch_videos SET transcript = $2, status = 'completed' WHERE id = $1")
            .bind(id)
            .bind(transcript)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Moves the video to 'failed' after an unrecoverable processing error.
    pub async fn mark_failed(&self, id: VideoId) -> Result<(), AppError> {
        sqlx::query("UPDATE pitch_videos SET status = 'failed' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
