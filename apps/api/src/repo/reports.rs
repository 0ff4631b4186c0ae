use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::ids::{ReportId, UserId};
use crate::models::report::PitchReport;

pub struct ReportRepo {
    pool: PgPool,
}

impl ReportRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, report: &PitchReport) -> Result<(), AppError> {
        let data = serde_json::to_value(report)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize PitchReport: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO pitch_reports
                (id, user_id, title, overall_score, is_shared, share_token, data,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(report.id)
        .bind(report.user_id)
        .bind(&report.title)
        .bind(report.overall_score)
        .bind(report.is_shared)
        .bind(&report.share_token)
        .bind(&data)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: ReportId) -> Result<Option<PitchReport>, AppError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM pitch_reports WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        deserialize_optional(data)
    }

    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<PitchReport>, AppError> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM pitch_reports WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|v| {
                serde_json::from_value(v).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("deserialize PitchReport: {e}"))
                })
            })
            .collect()
    }

    pub async fn get_by_share_token(&self, token: &str) -> Result<Option<PitchReport>, AppError> {
        let data: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM pitch_reports WHERE share_token = $1 AND is_shared = TRUE",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        deserialize_optional(data)
    }

    /// Persists the shared state of a report. Last write wins: a second share
    /// overwrites the previous token, and only the latest token resolves.
    pub async fn mark_shared(&self, report: &PitchReport) -> Result<(), AppError> {
        let data = serde_json::to_value(report)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize PitchReport: {e}")))?;

        sqlx::query(
            r#"
            UPDATE pitch_reports
            SET is_shared = $2, share_token = $3, updated_at = $4, data = $5
            WHERE id = $1
            "#,
        )
        .bind(report.id)
        .bind(report.is_shared)
        .bind(&report.share_token)
        .bind(report.updated_at)
        .bind(&data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn deserialize_optional(
    data: Option<serde_json::Value>,
) -> Result<Option<PitchReport>, AppError> {
    data.map(|v| {
        serde_json::from_value(v)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("deserialize PitchReport: {e}")))
    })
    .transpose()
}
