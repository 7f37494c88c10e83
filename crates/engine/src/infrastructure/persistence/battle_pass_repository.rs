//! Postgres adapter for `BattlePassRepo`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use arenaforge_domain::{BattlePassId, BattlePassProgress, PlayerId};

use crate::infrastructure::ports::{BattlePassRepo, RepoError};

pub struct PgBattlePassRepo {
    pool: PgPool,
}

impl PgBattlePassRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn progress_from_row(row: &PgRow) -> Result<BattlePassProgress, sqlx::Error> {
    Ok(BattlePassProgress {
        battle_pass_id: BattlePassId::new(row.try_get("battle_pass_id")?),
        total_xp: row.try_get("total_xp")?,
        level: row.try_get("bp_level")?,
        unlocked: row.try_get("unlocked")?,
    })
}

#[async_trait]
impl BattlePassRepo for PgBattlePassRepo {
    async fn progress(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
    ) -> Result<Option<BattlePassProgress>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM player_battle_pass WHERE player_id = $1 AND battle_pass_id = $2",
        )
        .bind(id.as_str())
        .bind(battle_pass_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(progress_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, id: &PlayerId, battle_pass_id: BattlePassId) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO player_battle_pass (player_id, battle_pass_id) VALUES ($1, $2)")
            .bind(id.as_str())
            .bind(battle_pass_id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_xp(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        xp: i64,
    ) -> Result<BattlePassProgress, RepoError> {
        let row = sqlx::query(
            "UPDATE player_battle_pass SET total_xp = total_xp + $3
             WHERE player_id = $1 AND battle_pass_id = $2
             RETURNING *",
        )
        .bind(id.as_str())
        .bind(battle_pass_id.as_i64())
        .bind(xp)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => progress_from_row(&row).map_err(Into::into),
            None => Err(RepoError::NotFound),
        }
    }

    async fn set_level(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        level: i32,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_battle_pass SET bp_level = $3
             WHERE player_id = $1 AND battle_pass_id = $2",
        )
        .bind(id.as_str())
        .bind(battle_pass_id.as_i64())
        .bind(level)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_unlocked(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        unlocked: bool,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_battle_pass SET unlocked = $3
             WHERE player_id = $1 AND battle_pass_id = $2",
        )
        .bind(id.as_str())
        .bind(battle_pass_id.as_i64())
        .bind(unlocked)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
