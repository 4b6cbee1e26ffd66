use crate::domain::{models::lead::LeadSummary, ports::LeadDirectory};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresLeadRepo {
    pool: PgPool,
}

impl PostgresLeadRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadDirectory for PostgresLeadRepo {
    async fn list(&self) -> Result<Vec<LeadSummary>, AppError> {
        sqlx::query_as::<_, LeadSummary>(
            "SELECT id, company AS display_name FROM leads ORDER BY company ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<LeadSummary>, AppError> {
        sqlx::query_as::<_, LeadSummary>(
            "SELECT id, company AS display_name FROM leads WHERE id = $1"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Entries keep living without their lead
        sqlx::query("UPDATE calendar_entries SET lead_id = NULL WHERE lead_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
