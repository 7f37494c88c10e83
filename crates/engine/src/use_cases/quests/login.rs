//! Login ladder: day-indexed rewards advanced once per real day.
//!
//! Advancement is gated on the last *claim*, not the last advance, so
//! marking a slot completed without claiming it does not let the next
//! slot unlock a day early.

use std::sync::Arc;

use arenaforge_domain::{LoginQuest, LoginQuestAssignment, PlayerId, RewardBundle};
use chrono::Duration;

use crate::infrastructure::ports::{CatalogPort, ClockPort, LoginQuestRepo};
use crate::use_cases::ledger::ProgressionLedger;
use crate::use_cases::quests::error::QuestError;

pub struct LoginLadder {
    login_repo: Arc<dyn LoginQuestRepo>,
    catalog: Arc<dyn CatalogPort>,
    ledger: Arc<ProgressionLedger>,
    clock: Arc<dyn ClockPort>,
}

impl LoginLadder {
    pub fn new(
        login_repo: Arc<dyn LoginQuestRepo>,
        catalog: Arc<dyn CatalogPort>,
        ledger: Arc<ProgressionLedger>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            login_repo,
            catalog,
            ledger,
            clock,
        }
    }

    /// Delete and recreate every slot from the catalog ladder.
    pub async fn reset(&self, player: &PlayerId) -> Result<(), QuestError> {
        let days: Vec<i32> = self
            .catalog
            .login_quests()
            .await?
            .iter()
            .map(|rung| rung.day)
            .collect();
        self.login_repo.replace_ladder(player, &days).await?;
        tracing::info!(player = %player, slots = days.len(), "Login ladder reset");
        Ok(())
    }

    /// Mark the next incomplete slot completed when at least one full
    /// day has passed since the last claim. Returns the advanced day,
    /// or `None` when nothing advanced (ladder finished or too soon).
    pub async fn try_advance(&self, player: &PlayerId) -> Result<Option<i32>, QuestError> {
        let ladder = self.login_repo.ladder(player).await?;
        let Some(next) = ladder.iter().find(|slot| !slot.completed) else {
            return Ok(None);
        };

        if let Some(last_claim) = self.login_repo.last_claim(player).await? {
            if self.clock.now() - last_claim < Duration::days(1) {
                return Ok(None);
            }
        }

        self.login_repo.mark_completed(player, next.day).await?;
        tracing::info!(player = %player, day = next.day, "Login ladder advanced");
        Ok(Some(next.day))
    }

    /// Claim one completed slot: pays its coin and cosmetic reward and
    /// stamps the claim time the next advance is gated on.
    pub async fn claim(&self, player: &PlayerId, day: i32) -> Result<LoginQuest, QuestError> {
        let ladder = self.login_repo.ladder(player).await?;
        let slot: &LoginQuestAssignment = ladder
            .iter()
            .find(|slot| slot.day == day)
            .ok_or(QuestError::LoginSlotNotFound(day))?;
        if !slot.completed {
            return Err(QuestError::LoginSlotNotComplete(day));
        }
        if slot.claimed {
            return Err(QuestError::LoginSlotAlreadyClaimed(day));
        }

        let rung = self
            .catalog
            .login_quests()
            .await?
            .into_iter()
            .find(|rung| rung.day == day)
            .ok_or(QuestError::LoginSlotNotFound(day))?;

        self.login_repo
            .mark_claimed(player, day, self.clock.now())
            .await?;

        let mut bundle = RewardBundle::new().with_coins(rung.coin_reward);
        if let Some(cosmetic_id) = rung.cosmetic_reward {
            bundle = bundle.grant(cosmetic_id, 1);
        }
        if !bundle.is_empty() {
            self.ledger.apply(player, "claim_login_quest", &bundle).await?;
        }

        tracing::info!(player = %player, day, coins = rung.coin_reward, "Login reward claimed");
        Ok(rung)
    }

    pub async fn ladder(&self, player: &PlayerId) -> Result<Vec<LoginQuestAssignment>, QuestError> {
        Ok(self.login_repo.ladder(player).await?)
    }
}
