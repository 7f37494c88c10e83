//! Quest tracking: assignment, progress, claims and rerolls.
//!
//! An assignment moves Assigned -> Completed -> Claimed. Daily and
//! weekly slots can additionally be rerolled into a different quest
//! once their cooldown elapses; achievements never reroll.

pub mod error;
pub mod login;

use std::sync::Arc;

use arenaforge_domain::{
    AssignedQuest, PlayerId, PlayerMatchResult, Quest, QuestCadence, QuestId,
};

use crate::infrastructure::ports::{
    CatalogPort, ClockPort, QuestRepo, RandomPort, TransactionLogPort,
};
use crate::use_cases::battle_pass::BattlePassEngine;
use crate::use_cases::ledger::ProgressionLedger;

pub use error::QuestError;
pub use login::LoginLadder;

/// Display view of one assigned quest.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuestStatus {
    pub quest: Quest,
    pub slot: Option<i32>,
    /// Capped at the required amount; storage keeps the raw value.
    pub progress: i32,
    pub completed: bool,
    pub claimed: bool,
    pub reroll_eligible: bool,
}

/// Coins and XP paid out by one claim.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ClaimedReward {
    pub coins: i64,
    pub xp: i64,
}

pub struct QuestTracker {
    quest_repo: Arc<dyn QuestRepo>,
    catalog: Arc<dyn CatalogPort>,
    ledger: Arc<ProgressionLedger>,
    battle_pass: Arc<BattlePassEngine>,
    log: Arc<dyn TransactionLogPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    daily_quest_slots: usize,
}

impl QuestTracker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quest_repo: Arc<dyn QuestRepo>,
        catalog: Arc<dyn CatalogPort>,
        ledger: Arc<ProgressionLedger>,
        battle_pass: Arc<BattlePassEngine>,
        log: Arc<dyn TransactionLogPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        daily_quest_slots: usize,
    ) -> Self {
        Self {
            quest_repo,
            catalog,
            ledger,
            battle_pass,
            log,
            clock,
            random,
            daily_quest_slots,
        }
    }

    /// First-time assignment: a random set of daily quests into
    /// numbered slots plus one assignment per achievement quest.
    pub async fn assign_initial(&self, player: &PlayerId) -> Result<(), QuestError> {
        let existing = self
            .quest_repo
            .list_by_cadence(player, QuestCadence::Daily)
            .await?;
        if !existing.is_empty() {
            return Err(QuestError::AlreadyInitialized);
        }

        let pool = self.catalog.all_daily_quests().await?;
        let chosen = self.sample_without_replacement(pool, self.daily_quest_slots);
        for (index, quest) in chosen.iter().enumerate() {
            self.quest_repo
                .insert_assignment(player, quest.id, Some(index as i32 + 1))
                .await?;
        }

        for achievement in self.catalog.all_achievements().await? {
            self.quest_repo
                .insert_assignment(player, achievement.id, None)
                .await?;
        }

        tracing::info!(
            player = %player,
            daily_slots = chosen.len(),
            "Initial quests assigned"
        );
        Ok(())
    }

    pub async fn increment_progress(
        &self,
        player: &PlayerId,
        quest_id: QuestId,
        amount: i32,
    ) -> Result<(), QuestError> {
        if amount <= 0 {
            return Ok(());
        }
        self.quest_repo
            .increment_progress(player, quest_id, amount)
            .await?;
        Ok(())
    }

    /// Bump every catalog quest tracking the given stat.
    pub async fn add_stat_progress(
        &self,
        player: &PlayerId,
        stat: &str,
        amount: i32,
    ) -> Result<(), QuestError> {
        for quest in self.catalog.quests_with_stat(stat).await? {
            self.increment_progress(player, quest.id, amount).await?;
        }
        Ok(())
    }

    /// Translate one match result into progress on every assigned
    /// quest. Stats the result does not cover contribute nothing.
    pub async fn add_match_progress(
        &self,
        result: &PlayerMatchResult,
    ) -> Result<(), QuestError> {
        let assigned = self.quest_repo.list_assigned(&result.player).await?;
        for entry in assigned {
            let amount = result.progress_for_stat(&entry.quest.stat);
            self.increment_progress(&result.player, entry.quest.id, amount)
                .await?;
        }
        Ok(())
    }

    /// Claim a completed quest: exactly-once payout, then an immediate
    /// reroll when the slot is already past its cooldown.
    pub async fn claim(
        &self,
        player: &PlayerId,
        quest_id: QuestId,
    ) -> Result<ClaimedReward, QuestError> {
        let assigned = self.assigned(player, quest_id).await?;
        if !assigned.is_complete() {
            return Err(QuestError::QuestNotComplete {
                progress: assigned.assignment.progress,
                required: assigned.quest.required_amount,
            });
        }
        if assigned.assignment.claimed {
            return Err(QuestError::AlreadyClaimed(quest_id));
        }

        let coins = assigned.quest.coin_reward;
        let xp = assigned.quest.xp_reward;

        self.log
            .record(
                player,
                "claim_quest",
                serde_json::json!({
                    "quest_id": quest_id.as_i64(),
                    "coins": coins,
                    "xp": xp,
                }),
            )
            .await?;
        self.quest_repo.mark_claimed(player, quest_id).await?;

        if assigned.reroll_eligible(self.clock.now()) {
            match self.replace_with_new(player, &assigned).await {
                Ok(_) | Err(QuestError::NoReplacementAvailable) => {}
                Err(err) => return Err(err),
            }
        }

        self.ledger.apply_currency_delta(player, coins).await?;
        self.battle_pass.add_xp(player, xp).await?;

        tracing::info!(player = %player, quest = %quest_id, coins, xp, "Quest claimed");
        Ok(ClaimedReward { coins, xp })
    }

    /// Reroll an assignment the player asked to swap. Requires the
    /// cooldown to have elapsed and never applies to achievements.
    pub async fn reroll(
        &self,
        player: &PlayerId,
        quest_id: QuestId,
    ) -> Result<Quest, QuestError> {
        let assigned = self.assigned(player, quest_id).await?;
        if !assigned.reroll_eligible(self.clock.now()) {
            return Err(QuestError::RerollNotEligible(quest_id));
        }
        self.replace_with_new(player, &assigned).await
    }

    /// Swap the slot to a uniformly chosen same-cadence quest that is
    /// neither already assigned nor shares a stat with another
    /// assigned non-achievement quest.
    async fn replace_with_new(
        &self,
        player: &PlayerId,
        assigned: &AssignedQuest,
    ) -> Result<Quest, QuestError> {
        let pool = match assigned.quest.cadence() {
            QuestCadence::Daily => self.catalog.all_daily_quests().await?,
            QuestCadence::Weekly => self.catalog.all_weekly_quests().await?,
            QuestCadence::Achievement => {
                return Err(QuestError::RerollNotEligible(assigned.quest.id))
            }
        };

        let current: Vec<AssignedQuest> = self
            .quest_repo
            .list_assigned(player)
            .await?
            .into_iter()
            .filter(|entry| entry.quest.cadence() != QuestCadence::Achievement)
            .collect();

        let candidates: Vec<Quest> = pool
            .into_iter()
            .filter(|quest| {
                current.iter().all(|entry| {
                    entry.quest.id != quest.id && entry.quest.stat != quest.stat
                })
            })
            .collect();
        if candidates.is_empty() {
            return Err(QuestError::NoReplacementAvailable);
        }

        let index = self.random.gen_range(0, candidates.len() as i32 - 1) as usize;
        let replacement = candidates[index].clone();

        self.log
            .record(
                player,
                "quest_reroll",
                serde_json::json!({
                    "old_quest": assigned.quest.id.as_i64(),
                    "new_quest": replacement.id.as_i64(),
                }),
            )
            .await?;
        self.quest_repo
            .replace_assignment(player, assigned.quest.id, replacement.id)
            .await?;

        tracing::info!(
            player = %player,
            old_quest = %assigned.quest.id,
            new_quest = %replacement.id,
            "Quest rerolled"
        );
        Ok(replacement)
    }

    /// Display list for one cadence, newest-slot first ordering left
    /// to the repository.
    pub async fn quest_statuses(
        &self,
        player: &PlayerId,
        cadence: QuestCadence,
    ) -> Result<Vec<QuestStatus>, QuestError> {
        let now = self.clock.now();
        let assigned = self.quest_repo.list_by_cadence(player, cadence).await?;
        Ok(assigned
            .into_iter()
            .map(|entry| QuestStatus {
                progress: entry.capped_progress(),
                completed: entry.is_complete(),
                claimed: entry.assignment.claimed,
                reroll_eligible: entry.reroll_eligible(now),
                slot: entry.assignment.slot,
                quest: entry.quest,
            })
            .collect())
    }

    /// Completed-but-unclaimed achievements, surfaced on the profile.
    pub async fn claimable_achievement_count(
        &self,
        player: &PlayerId,
    ) -> Result<usize, QuestError> {
        let achievements = self
            .quest_repo
            .list_by_cadence(player, QuestCadence::Achievement)
            .await?;
        Ok(achievements
            .iter()
            .filter(|entry| entry.is_complete() && !entry.assignment.claimed)
            .count())
    }

    async fn assigned(
        &self,
        player: &PlayerId,
        quest_id: QuestId,
    ) -> Result<AssignedQuest, QuestError> {
        if self.catalog.quest(quest_id).await?.is_none() {
            return Err(QuestError::QuestNotFound(quest_id));
        }
        self.quest_repo
            .assignment(player, quest_id)
            .await?
            .ok_or(QuestError::NotAssigned(quest_id))
    }

    fn sample_without_replacement(&self, mut pool: Vec<Quest>, count: usize) -> Vec<Quest> {
        let mut chosen = Vec::with_capacity(count);
        while chosen.len() < count && !pool.is_empty() {
            let index = self.random.gen_range(0, pool.len() as i32 - 1) as usize;
            chosen.push(pool.swap_remove(index));
        }
        chosen
    }
}
