//! Postgres adapter for `PlayerRepo`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use arenaforge_domain::{MatchRecord, Player, PlayerId, UserType};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

pub struct PgPlayerRepo {
    pool: PgPool,
}

impl PgPlayerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn player_from_row(row: &PgRow) -> Result<Player, sqlx::Error> {
    let user_type: String = row.try_get("user_type")?;
    Ok(Player {
        id: PlayerId::new(row.try_get::<String, _>("player_id")?),
        username: row.try_get("username")?,
        coins: row.try_get("coins")?,
        mmr: row.try_get("mmr")?,
        user_type: UserType::parse(&user_type),
        plus_expiration: row.try_get("plus_expiration")?,
        created_at: row.try_get("created_at")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<MatchRecord, sqlx::Error> {
    Ok(MatchRecord {
        game_id: row.try_get("game_id")?,
        placement: row.try_get("placement")?,
        round_wins: row.try_get("round_wins")?,
        xp_earned: row.try_get("xp")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PlayerRepo for PgPlayerRepo {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT * FROM players WHERE player_id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(player_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO players (player_id, username, coins, mmr, user_type, plus_expiration, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(player.id.as_str())
        .bind(&player.username)
        .bind(player.coins)
        .bind(player.mmr)
        .bind(player.user_type.as_str())
        .bind(player.plus_expiration)
        .bind(player.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_username(&self, id: &PlayerId, username: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE players SET username = $2 WHERE player_id = $1")
            .bind(id.as_str())
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_user_type(&self, id: &PlayerId, user_type: UserType) -> Result<(), RepoError> {
        sqlx::query("UPDATE players SET user_type = $2 WHERE player_id = $1")
            .bind(id.as_str())
            .bind(user_type.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_coins(&self, id: &PlayerId, delta: i64) -> Result<(), RepoError> {
        sqlx::query("UPDATE players SET coins = coins + $2 WHERE player_id = $1")
            .bind(id.as_str())
            .bind(delta)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_mmr(&self, id: &PlayerId, delta: i32) -> Result<(), RepoError> {
        sqlx::query("UPDATE players SET mmr = mmr + $2 WHERE player_id = $1")
            .bind(id.as_str())
            .bind(delta)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn extend_plus(&self, id: &PlayerId, days: i64) -> Result<(), RepoError> {
        // Extends from the current expiry when still active, otherwise
        // from now.
        sqlx::query(
            "UPDATE players
             SET plus_expiration = GREATEST(COALESCE(plus_expiration, now()), now())
                 + $2 * INTERVAL '1 DAY'
             WHERE player_id = $1",
        )
        .bind(id.as_str())
        .bind(days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY mmr DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| player_from_row(row).map_err(Into::into)).collect()
    }

    async fn count_with_mmr_above(&self, mmr: i32) -> Result<i64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM players WHERE mmr > $1")
            .bind(mmr)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent_matches(
        &self,
        id: &PlayerId,
        limit: i64,
        offset: i64,
        within_hours: Option<i64>,
    ) -> Result<Vec<MatchRecord>, RepoError> {
        let rows = match within_hours {
            Some(hours) => {
                sqlx::query(
                    "SELECT g.game_id, g.created_at, gp.placement, gp.round_wins, gp.xp
                     FROM game_players gp
                     JOIN games g USING (game_id)
                     WHERE gp.player_id = $1
                       AND g.created_at >= now() - $4 * INTERVAL '1 HOUR'
                     ORDER BY g.created_at DESC
                     LIMIT $2 OFFSET $3",
                )
                .bind(id.as_str())
                .bind(limit)
                .bind(offset)
                .bind(hours)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT g.game_id, g.created_at, gp.placement, gp.round_wins, gp.xp
                     FROM game_players gp
                     JOIN games g USING (game_id)
                     WHERE gp.player_id = $1
                     ORDER BY g.created_at DESC
                     LIMIT $2 OFFSET $3",
                )
                .bind(id.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(|row| match_from_row(row).map_err(Into::into)).collect()
    }

    async fn matches_today(&self, id: &PlayerId) -> Result<Vec<MatchRecord>, RepoError> {
        let rows = sqlx::query(
            "SELECT g.game_id, g.created_at, gp.placement, gp.round_wins, gp.xp
             FROM game_players gp
             JOIN games g USING (game_id)
             WHERE gp.player_id = $1 AND g.created_at >= now()::date
             ORDER BY g.created_at DESC",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|row| match_from_row(row).map_err(Into::into)).collect()
    }

    async fn daily_xp(&self, id: &PlayerId) -> Result<i64, RepoError> {
        let xp: Option<i64> = sqlx::query_scalar(
            "SELECT sum(gp.xp)
             FROM game_players gp
             JOIN games g USING (game_id)
             WHERE gp.player_id = $1 AND g.created_at >= now()::date",
        )
        .bind(id.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(xp.unwrap_or(0))
    }
}
