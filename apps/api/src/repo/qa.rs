use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::ids::UserId;
use crate::models::qa::InvestorQa;

pub struct InvestorQaRepo {
    pool: PgPool,
}

impl InvestorQaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, qa: &InvestorQa) -> Result<(), AppError> {
        let data = serde_json::to_value(qa)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize InvestorQa: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO investor_qas (id, user_id, deck_id, video_id, data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(qa.id)
        .bind(qa.user_id)
        .bind(qa.deck_id)
        .bind(qa.video_id)
        .bind(&data)
        .bind(qa.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<InvestorQa>, AppError> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM investor_qas WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|v| {
                serde_json::from_value(v)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("deserialize InvestorQa: {e}")))
            })
            .collect()
    }
}
