//! Battle pass engine: XP accumulation and cascading level rewards.
//!
//! This is the only way battle pass XP is ever added to a player, so a
//! level is never crossed without its reward being issued.

pub mod error;

use std::sync::Arc;

use arenaforge_domain::{BattlePassProgress, LevelRequirement, PlayerId};

use crate::config::{PlacementReward, PlacementRewardTable};
use crate::infrastructure::ports::{BattlePassCatalogPort, BattlePassRepo, TransactionLogPort};
use crate::use_cases::ledger::ProgressionLedger;

pub use error::BattlePassError;

pub struct BattlePassEngine {
    bp_repo: Arc<dyn BattlePassRepo>,
    bp_catalog: Arc<dyn BattlePassCatalogPort>,
    ledger: Arc<ProgressionLedger>,
    log: Arc<dyn TransactionLogPort>,
    placement_rewards: PlacementRewardTable,
}

impl BattlePassEngine {
    pub fn new(
        bp_repo: Arc<dyn BattlePassRepo>,
        bp_catalog: Arc<dyn BattlePassCatalogPort>,
        ledger: Arc<ProgressionLedger>,
        log: Arc<dyn TransactionLogPort>,
        placement_rewards: PlacementRewardTable,
    ) -> Self {
        Self {
            bp_repo,
            bp_catalog,
            ledger,
            log,
            placement_rewards,
        }
    }

    /// Grant XP toward the active season and pay out every level the
    /// grant crosses, exactly once each.
    ///
    /// Returns the updated progress, or `None` when the grant was a
    /// no-op (xp <= 0).
    pub async fn add_xp(
        &self,
        player: &PlayerId,
        xp: i64,
    ) -> Result<Option<BattlePassProgress>, BattlePassError> {
        if xp <= 0 {
            return Ok(None);
        }

        let season = self
            .bp_catalog
            .active_battle_pass()
            .await?
            .ok_or(BattlePassError::NoActiveSeason)?;

        // The returned row still carries the pre-grant level.
        let mut progress = self.bp_repo.add_xp(player, season.id, xp).await?;
        let previous_level = progress.level;

        let new_level = self
            .bp_catalog
            .calculate_level(season.id, progress.total_xp)
            .await?;

        if new_level == previous_level {
            return Ok(Some(progress));
        }

        self.bp_repo.set_level(player, season.id, new_level).await?;
        progress.level = new_level;

        // One combined bundle for every crossed level: cosmetics one
        // unit at a time, then a single summed coin delta.
        let rewards = self
            .bp_catalog
            .rewards_in_range(season.id, previous_level + 1, new_level)
            .await?;

        for reward in &rewards.cosmetics {
            self.ledger
                .grant_item(player, reward.cosmetic_id, reward.amount.max(0) as u32)
                .await?;
        }
        if rewards.coins > 0 {
            self.ledger.apply_currency_delta(player, rewards.coins).await?;
        }

        tracing::info!(
            player = %player,
            season = %season.id,
            previous_level,
            new_level,
            xp,
            "Battle pass level up"
        );

        Ok(Some(progress))
    }

    /// Post-match placement rewards. Placements outside the table earn
    /// nothing.
    pub async fn post_match_rewards(
        &self,
        player: &PlayerId,
        placement: i32,
    ) -> Result<PlacementReward, BattlePassError> {
        let Some(reward) = self.placement_rewards.reward_for(placement) else {
            return Ok(PlacementReward {
                placement,
                xp: 0,
                coins: 0,
            });
        };

        self.log
            .record(
                player,
                "game_xp",
                serde_json::json!({
                    "placement": placement,
                    "xp": reward.xp,
                    "coins": reward.coins,
                }),
            )
            .await?;

        self.add_xp(player, reward.xp).await?;
        self.ledger.apply_currency_delta(player, reward.coins).await?;

        Ok(reward)
    }

    /// Current-season progress plus the XP requirement for the next
    /// level.
    pub async fn active_progress(
        &self,
        player: &PlayerId,
    ) -> Result<(BattlePassProgress, Option<LevelRequirement>), BattlePassError> {
        let season = self
            .bp_catalog
            .active_battle_pass()
            .await?
            .ok_or(BattlePassError::NoActiveSeason)?;
        let progress = self
            .bp_repo
            .progress(player, season.id)
            .await?
            .ok_or(BattlePassError::ProgressNotFound)?;
        let requirement = self
            .bp_catalog
            .requirements_at_level(season.id, progress.level)
            .await?;
        Ok((progress, requirement))
    }

    /// Unlock the premium reward tier for the active season.
    pub async fn unlock_premium(&self, player: &PlayerId) -> Result<(), BattlePassError> {
        let season = self
            .bp_catalog
            .active_battle_pass()
            .await?
            .ok_or(BattlePassError::NoActiveSeason)?;
        self.bp_repo.set_unlocked(player, season.id, true).await?;
        Ok(())
    }
}
