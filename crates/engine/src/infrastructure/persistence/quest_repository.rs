//! Postgres adapter for `QuestRepo` and `LoginQuestRepo`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use arenaforge_domain::{
    AssignedQuest, LoginQuestAssignment, PlayerId, Quest, QuestAssignment, QuestCadence, QuestId,
};

use crate::infrastructure::ports::{LoginQuestRepo, QuestRepo, RepoError};

pub struct PgQuestRepo {
    pool: PgPool,
}

impl PgQuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn quest_from_row(row: &PgRow) -> Result<Quest, sqlx::Error> {
    Ok(Quest {
        id: QuestId::new(row.try_get("quest_id")?),
        name: row.try_get("name")?,
        stat: row.try_get("stat")?,
        required_amount: row.try_get("required_amount")?,
        coin_reward: row.try_get("coin_reward")?,
        xp_reward: row.try_get("xp_reward")?,
        is_weekly: row.try_get("is_weekly")?,
        is_achievement: row.try_get("is_achievement")?,
    })
}

fn assigned_from_row(row: &PgRow) -> Result<AssignedQuest, sqlx::Error> {
    let quest = quest_from_row(row)?;
    Ok(AssignedQuest {
        assignment: QuestAssignment {
            quest_id: quest.id,
            slot: row.try_get("quest_index")?,
            progress: row.try_get("quest_progress")?,
            claimed: row.try_get("claimed")?,
            created_at: row.try_get("created")?,
        },
        quest,
    })
}

const ASSIGNED_SELECT: &str = "SELECT q.*, pq.quest_index, pq.quest_progress, pq.claimed, pq.created
     FROM player_quests pq
     JOIN quests q USING (quest_id)";

#[async_trait]
impl QuestRepo for PgQuestRepo {
    async fn assignment(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
    ) -> Result<Option<AssignedQuest>, RepoError> {
        let row = sqlx::query(&format!(
            "{ASSIGNED_SELECT} WHERE pq.player_id = $1 AND pq.quest_id = $2"
        ))
        .bind(id.as_str())
        .bind(quest_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(assigned_from_row).transpose().map_err(Into::into)
    }

    async fn list_assigned(&self, id: &PlayerId) -> Result<Vec<AssignedQuest>, RepoError> {
        let rows = sqlx::query(&format!(
            "{ASSIGNED_SELECT} WHERE pq.player_id = $1 ORDER BY pq.quest_index, q.quest_id"
        ))
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|row| assigned_from_row(row).map_err(Into::into)).collect()
    }

    async fn list_by_cadence(
        &self,
        id: &PlayerId,
        cadence: QuestCadence,
    ) -> Result<Vec<AssignedQuest>, RepoError> {
        let filter = match cadence {
            QuestCadence::Daily => "q.is_achievement = FALSE AND q.is_weekly = FALSE",
            QuestCadence::Weekly => "q.is_achievement = FALSE AND q.is_weekly = TRUE",
            QuestCadence::Achievement => "q.is_achievement = TRUE",
        };
        let rows = sqlx::query(&format!(
            "{ASSIGNED_SELECT} WHERE pq.player_id = $1 AND {filter}
             ORDER BY pq.quest_index, q.quest_id"
        ))
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|row| assigned_from_row(row).map_err(Into::into)).collect()
    }

    async fn insert_assignment(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
        slot: Option<i32>,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO player_quests (player_id, quest_id, quest_index) VALUES ($1, $2, $3)",
        )
        .bind(id.as_str())
        .bind(quest_id.as_i64())
        .bind(slot)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_progress(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
        amount: i32,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_quests SET quest_progress = quest_progress + $3
             WHERE player_id = $1 AND quest_id = $2",
        )
        .bind(id.as_str())
        .bind(quest_id.as_i64())
        .bind(amount)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_claimed(&self, id: &PlayerId, quest_id: QuestId) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_quests SET claimed = TRUE WHERE player_id = $1 AND quest_id = $2",
        )
        .bind(id.as_str())
        .bind(quest_id.as_i64())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_assignment(
        &self,
        id: &PlayerId,
        old_quest: QuestId,
        new_quest: QuestId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE player_quests
             SET (quest_id, quest_progress, claimed, created) = ($3, DEFAULT, DEFAULT, DEFAULT)
             WHERE player_id = $1 AND quest_id = $2",
        )
        .bind(id.as_str())
        .bind(old_quest.as_i64())
        .bind(new_quest.as_i64())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Login ladder
// =============================================================================

pub struct PgLoginQuestRepo {
    pool: PgPool,
}

impl PgLoginQuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn login_from_row(row: &PgRow) -> Result<LoginQuestAssignment, sqlx::Error> {
    Ok(LoginQuestAssignment {
        day: row.try_get("day")?,
        completed: row.try_get("completed")?,
        claimed: row.try_get("claimed")?,
        claimed_at: row.try_get("claimed_at")?,
    })
}

#[async_trait]
impl LoginQuestRepo for PgLoginQuestRepo {
    async fn ladder(&self, id: &PlayerId) -> Result<Vec<LoginQuestAssignment>, RepoError> {
        let rows =
            sqlx::query("SELECT * FROM player_login_quests WHERE player_id = $1 ORDER BY day")
                .bind(id.as_str())
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(|row| login_from_row(row).map_err(Into::into)).collect()
    }

    async fn replace_ladder(&self, id: &PlayerId, days: &[i32]) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM player_login_quests WHERE player_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        for day in days {
            sqlx::query("INSERT INTO player_login_quests (player_id, day) VALUES ($1, $2)")
                .bind(id.as_str())
                .bind(day)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn mark_completed(&self, id: &PlayerId, day: i32) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_login_quests SET completed = TRUE WHERE player_id = $1 AND day = $2",
        )
        .bind(id.as_str())
        .bind(day)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_claimed(
        &self,
        id: &PlayerId,
        day: i32,
        claimed_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_login_quests SET claimed = TRUE, claimed_at = $3
             WHERE player_id = $1 AND day = $2",
        )
        .bind(id.as_str())
        .bind(day)
        .bind(claimed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn last_claim(&self, id: &PlayerId) -> Result<Option<DateTime<Utc>>, RepoError> {
        let last: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT max(claimed_at) FROM player_login_quests WHERE player_id = $1",
        )
        .bind(id.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(last)
    }
}
