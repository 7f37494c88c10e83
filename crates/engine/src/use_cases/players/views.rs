//! Read-side player views: profile, leaderboard and match history.

use arenaforge_domain::{MatchRecord, OwnedCosmetic, Player, PlayerId};
use serde::Serialize;

use crate::use_cases::players::{PlayerError, PlayerFacade};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    /// 1-based position among all players ordered by MMR.
    pub rank: i64,
    pub claimable_achievements: usize,
    /// Whether the plus subscription is unexpired right now.
    pub plus_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    /// Dense rank: players on the same MMR share a rank.
    pub rank: i64,
    pub player: Player,
}

impl PlayerFacade {
    pub async fn profile(&self, player: &PlayerId) -> Result<PlayerProfile, PlayerError> {
        let row = self
            .player_repo
            .get(player)
            .await?
            .ok_or(PlayerError::PlayerNotFound)?;
        let rank = self.player_repo.count_with_mmr_above(row.mmr).await? + 1;
        let claimable_achievements = self.quests.claimable_achievement_count(player).await?;
        let plus_active = row.has_active_plus(self.clock.now());
        Ok(PlayerProfile {
            player: row,
            rank,
            claimable_achievements,
            plus_active,
        })
    }

    /// Top players by MMR with dense ranking.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PlayerError> {
        let players = self.player_repo.leaderboard(self.leaderboard_size).await?;

        let mut entries = Vec::with_capacity(players.len());
        let mut rank = 0;
        let mut previous_mmr = None;
        for player in players {
            if previous_mmr != Some(player.mmr) {
                rank += 1;
                previous_mmr = Some(player.mmr);
            }
            entries.push(LeaderboardEntry { rank, player });
        }
        Ok(entries)
    }

    pub async fn inventory(&self, player: &PlayerId) -> Result<Vec<OwnedCosmetic>, PlayerError> {
        Ok(self.inventory_repo.list(player).await?)
    }

    pub async fn match_history(
        &self,
        player: &PlayerId,
        limit: i64,
        offset: i64,
        within_hours: Option<i64>,
    ) -> Result<Vec<MatchRecord>, PlayerError> {
        Ok(self
            .player_repo
            .recent_matches(player, limit, offset, within_hours)
            .await?)
    }

    pub async fn games_today(&self, player: &PlayerId) -> Result<Vec<MatchRecord>, PlayerError> {
        Ok(self.player_repo.matches_today(player).await?)
    }

    /// Battle pass XP earned since midnight, shown on the profile.
    pub async fn daily_xp(&self, player: &PlayerId) -> Result<i64, PlayerError> {
        Ok(self.player_repo.daily_xp(player).await?)
    }
}
