//! Postgres adapters for the read-only catalogs.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use arenaforge_domain::{
    BattlePass, BattlePassId, BattlePassRewards, ChestDropType, CoinRewardEntry, Cosmetic,
    CosmeticId, CosmeticReward, DropTableEntry, LevelRequirement, LoginQuest, Quest, QuestId,
};

use crate::infrastructure::persistence::inventory_repository::cosmetic_from_row;
use crate::infrastructure::persistence::quest_repository::quest_from_row;
use crate::infrastructure::ports::{BattlePassCatalogPort, CatalogPort, RepoError};

pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn quests_where(&self, filter: &str) -> Result<Vec<Quest>, RepoError> {
        let rows = sqlx::query(&format!("SELECT * FROM quests WHERE {filter} ORDER BY quest_id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| quest_from_row(row).map_err(Into::into)).collect()
    }
}

#[async_trait]
impl CatalogPort for PgCatalog {
    async fn cosmetic(&self, id: CosmeticId) -> Result<Option<Cosmetic>, RepoError> {
        let row = sqlx::query("SELECT * FROM cosmetics WHERE cosmetic_id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(cosmetic_from_row).transpose()
    }

    async fn cosmetic_by_name(&self, name: &str) -> Result<Option<Cosmetic>, RepoError> {
        let row = sqlx::query("SELECT * FROM cosmetics WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(cosmetic_from_row).transpose()
    }

    async fn equip_group(&self, id: CosmeticId) -> Result<Option<String>, RepoError> {
        let group: Option<Option<String>> =
            sqlx::query_scalar("SELECT equip_group FROM cosmetics WHERE cosmetic_id = $1")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;
        Ok(group.flatten())
    }

    async fn chest_drop_types(
        &self,
        chest_id: CosmeticId,
    ) -> Result<Vec<ChestDropType>, RepoError> {
        let rows = sqlx::query(
            "SELECT drop_type, cum_sum FROM chest_drop_types
             WHERE chest_id = $1 ORDER BY cum_sum",
        )
        .bind(chest_id.as_i64())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                Ok(ChestDropType {
                    drop_type: row.try_get("drop_type").map_err(RepoError::from)?,
                    cum_sum: row.try_get("cum_sum").map_err(RepoError::from)?,
                })
            })
            .collect()
    }

    async fn drop_type_rewards(&self, drop_type: &str) -> Result<Vec<DropTableEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT reward_id, cum_sum FROM drop_type_rewards
             WHERE drop_type = $1 ORDER BY cum_sum",
        )
        .bind(drop_type)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                Ok(DropTableEntry {
                    reward_id: CosmeticId::new(row.try_get("reward_id").map_err(RepoError::from)?),
                    cum_sum: row.try_get("cum_sum").map_err(RepoError::from)?,
                })
            })
            .collect()
    }

    async fn chest_coin_rewards(
        &self,
        chest_id: CosmeticId,
    ) -> Result<Vec<CoinRewardEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT coins, cum_sum FROM chest_coin_rewards
             WHERE chest_id = $1 ORDER BY cum_sum",
        )
        .bind(chest_id.as_i64())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                Ok(CoinRewardEntry {
                    coins: row.try_get("coins").map_err(RepoError::from)?,
                    cum_sum: row.try_get("cum_sum").map_err(RepoError::from)?,
                })
            })
            .collect()
    }

    async fn chest_bonus_rewards(
        &self,
        chest_id: CosmeticId,
    ) -> Result<Vec<DropTableEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT reward_id, cum_sum FROM chest_bonus_rewards
             WHERE chest_id = $1 ORDER BY cum_sum",
        )
        .bind(chest_id.as_i64())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                Ok(DropTableEntry {
                    reward_id: CosmeticId::new(row.try_get("reward_id").map_err(RepoError::from)?),
                    cum_sum: row.try_get("cum_sum").map_err(RepoError::from)?,
                })
            })
            .collect()
    }

    async fn all_daily_quests(&self) -> Result<Vec<Quest>, RepoError> {
        self.quests_where("is_achievement = FALSE AND is_weekly = FALSE").await
    }

    async fn all_weekly_quests(&self) -> Result<Vec<Quest>, RepoError> {
        self.quests_where("is_achievement = FALSE AND is_weekly = TRUE").await
    }

    async fn all_achievements(&self) -> Result<Vec<Quest>, RepoError> {
        self.quests_where("is_achievement = TRUE").await
    }

    async fn login_quests(&self) -> Result<Vec<LoginQuest>, RepoError> {
        let rows = sqlx::query("SELECT * FROM login_quests ORDER BY day")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| {
                Ok(LoginQuest {
                    day: row.try_get("day").map_err(RepoError::from)?,
                    coin_reward: row.try_get("coin_reward").map_err(RepoError::from)?,
                    cosmetic_reward: row
                        .try_get::<Option<i64>, _>("cosmetic_reward")
                        .map_err(RepoError::from)?
                        .map(CosmeticId::new),
                })
            })
            .collect()
    }

    async fn quest(&self, id: QuestId) -> Result<Option<Quest>, RepoError> {
        let row = sqlx::query("SELECT * FROM quests WHERE quest_id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(quest_from_row).transpose().map_err(Into::into)
    }

    async fn quests_with_stat(&self, stat: &str) -> Result<Vec<Quest>, RepoError> {
        let rows = sqlx::query("SELECT * FROM quests WHERE stat = $1 ORDER BY quest_id")
            .bind(stat)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| quest_from_row(row).map_err(Into::into)).collect()
    }
}

#[async_trait]
impl BattlePassCatalogPort for PgCatalog {
    async fn active_battle_pass(&self) -> Result<Option<BattlePass>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM battle_passes
             WHERE start_at <= now() AND end_at > now()
             ORDER BY start_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| {
            Ok(BattlePass {
                id: BattlePassId::new(row.try_get("battle_pass_id").map_err(RepoError::from)?),
                max_level: row.try_get("max_level").map_err(RepoError::from)?,
                start: row.try_get("start_at").map_err(RepoError::from)?,
                end: row.try_get("end_at").map_err(RepoError::from)?,
            })
        })
        .transpose()
    }

    async fn requirements_at_level(
        &self,
        battle_pass_id: BattlePassId,
        level: i32,
    ) -> Result<Option<LevelRequirement>, RepoError> {
        let xp: Option<i64> = sqlx::query_scalar(
            "SELECT xp_threshold FROM battle_pass_levels
             WHERE battle_pass_id = $1 AND level = $2",
        )
        .bind(battle_pass_id.as_i64())
        .bind(level + 1)
        .fetch_optional(&self.pool)
        .await?;
        Ok(xp.map(|next_level_xp| LevelRequirement {
            level,
            next_level_xp,
        }))
    }

    async fn calculate_level(
        &self,
        battle_pass_id: BattlePassId,
        total_xp: i64,
    ) -> Result<i32, RepoError> {
        // LEAST enforces the season cap even when level rows exceed
        // the season's max_level.
        let level: Option<i32> = sqlx::query_scalar(
            "SELECT LEAST(max(bpl.level), bp.max_level)
             FROM battle_pass_levels bpl
             JOIN battle_passes bp USING (battle_pass_id)
             WHERE bpl.battle_pass_id = $1 AND bpl.xp_threshold <= $2
             GROUP BY bp.max_level",
        )
        .bind(battle_pass_id.as_i64())
        .bind(total_xp)
        .fetch_optional(&self.pool)
        .await?;
        Ok(level.unwrap_or(0))
    }

    async fn rewards_in_range(
        &self,
        battle_pass_id: BattlePassId,
        from: i32,
        to: i32,
    ) -> Result<BattlePassRewards, RepoError> {
        let coins: Option<i64> = sqlx::query_scalar(
            "SELECT sum(coin_reward) FROM battle_pass_levels
             WHERE battle_pass_id = $1 AND level BETWEEN $2 AND $3",
        )
        .bind(battle_pass_id.as_i64())
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            "SELECT cosmetic_id, sum(amount) AS amount
             FROM battle_pass_cosmetic_rewards
             WHERE battle_pass_id = $1 AND level BETWEEN $2 AND $3
             GROUP BY cosmetic_id ORDER BY cosmetic_id",
        )
        .bind(battle_pass_id.as_i64())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let cosmetics = rows
            .iter()
            .map(|row| {
                Ok(CosmeticReward {
                    cosmetic_id: CosmeticId::new(
                        row.try_get("cosmetic_id").map_err(RepoError::from)?,
                    ),
                    amount: row.try_get::<i64, _>("amount").map_err(RepoError::from)? as i32,
                })
            })
            .collect::<Result<Vec<_>, RepoError>>()?;

        Ok(BattlePassRewards {
            cosmetics,
            coins: coins.unwrap_or(0),
        })
    }
}
