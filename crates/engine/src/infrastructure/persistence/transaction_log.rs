//! Postgres adapter for the append-only transaction log.

use async_trait::async_trait;
use sqlx::PgPool;

use arenaforge_domain::PlayerId;

use crate::infrastructure::ports::{RepoError, TransactionLogPort};

pub struct PgTransactionLog {
    pool: PgPool,
}

impl PgTransactionLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionLogPort for PgTransactionLog {
    async fn record(
        &self,
        id: &PlayerId,
        kind: &str,
        payload: serde_json::Value,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO player_transactions (id, player_id, kind, payload) VALUES ($1, $2, $3, $4)",
        )
        .bind(uuid::Uuid::new_v4())
        .bind(id.as_str())
        .bind(kind)
        .bind(payload)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
