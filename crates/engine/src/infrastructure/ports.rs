//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Ports exist for:
//! - Database access (one narrow repo per entity, swappable store)
//! - Read-only catalog data (cosmetics, quests, battle pass seasons)
//! - The append-only transaction log
//! - Clock/Random (for deterministic tests)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use arenaforge_domain::{
    AssignedQuest, BattlePass, BattlePassId, BattlePassProgress, BattlePassRewards, ChestDropType,
    CoinRewardEntry, Cosmetic, CosmeticId, DropTableEntry, LevelRequirement, LoginQuest,
    LoginQuestAssignment, MatchRecord, OwnedCosmetic, Player, PlayerId, Quest, QuestCadence,
    QuestId, UserType,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Database(other.to_string()),
        }
    }
}

// =============================================================================
// Player Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>, RepoError>;
    async fn insert(&self, player: &Player) -> Result<(), RepoError>;
    async fn update_username(&self, id: &PlayerId, username: &str) -> Result<(), RepoError>;
    async fn set_user_type(&self, id: &PlayerId, user_type: UserType) -> Result<(), RepoError>;

    /// Unchecked additive update; balance checks happen in the ledger
    /// before this is called.
    async fn add_coins(&self, id: &PlayerId, delta: i64) -> Result<(), RepoError>;
    async fn add_mmr(&self, id: &PlayerId, delta: i32) -> Result<(), RepoError>;
    async fn extend_plus(&self, id: &PlayerId, days: i64) -> Result<(), RepoError>;

    // Ranking reads
    async fn leaderboard(&self, limit: i64) -> Result<Vec<Player>, RepoError>;
    async fn count_with_mmr_above(&self, mmr: i32) -> Result<i64, RepoError>;

    // Match history reads
    async fn recent_matches(
        &self,
        id: &PlayerId,
        limit: i64,
        offset: i64,
        within_hours: Option<i64>,
    ) -> Result<Vec<MatchRecord>, RepoError>;
    async fn matches_today(&self, id: &PlayerId) -> Result<Vec<MatchRecord>, RepoError>;
    async fn daily_xp(&self, id: &PlayerId) -> Result<i64, RepoError>;
}

// =============================================================================
// Inventory Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepo: Send + Sync {
    async fn list(&self, id: &PlayerId) -> Result<Vec<OwnedCosmetic>, RepoError>;
    async fn count_owned(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<i64, RepoError>;

    /// Insert one independent ownership unit.
    async fn insert_unit(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<(), RepoError>;

    /// Delete one arbitrarily chosen owned unit. Returns whether a row
    /// was actually deleted.
    async fn delete_unit(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<bool, RepoError>;

    async fn set_equipped(
        &self,
        id: &PlayerId,
        cosmetic_id: CosmeticId,
        equipped: bool,
    ) -> Result<(), RepoError>;

    /// Unequip every owned unit belonging to the given equip group.
    async fn unequip_group(&self, id: &PlayerId, equip_group: &str) -> Result<(), RepoError>;
}

// =============================================================================
// Quest Assignment Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn assignment(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
    ) -> Result<Option<AssignedQuest>, RepoError>;

    /// Every assignment the player has, achievements included.
    async fn list_assigned(&self, id: &PlayerId) -> Result<Vec<AssignedQuest>, RepoError>;
    async fn list_by_cadence(
        &self,
        id: &PlayerId,
        cadence: QuestCadence,
    ) -> Result<Vec<AssignedQuest>, RepoError>;

    async fn insert_assignment(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
        slot: Option<i32>,
    ) -> Result<(), RepoError>;
    async fn increment_progress(
        &self,
        id: &PlayerId,
        quest_id: QuestId,
        amount: i32,
    ) -> Result<(), RepoError>;
    async fn mark_claimed(&self, id: &PlayerId, quest_id: QuestId) -> Result<(), RepoError>;

    /// Swap a slot to a new quest: progress and claimed reset, the
    /// creation timestamp restarts, the slot index is preserved.
    async fn replace_assignment(
        &self,
        id: &PlayerId,
        old_quest: QuestId,
        new_quest: QuestId,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Login Ladder Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginQuestRepo: Send + Sync {
    /// All ladder slots for the player, ordered by day.
    async fn ladder(&self, id: &PlayerId) -> Result<Vec<LoginQuestAssignment>, RepoError>;

    /// Delete and recreate every slot (cadence restart).
    async fn replace_ladder(&self, id: &PlayerId, days: &[i32]) -> Result<(), RepoError>;

    async fn mark_completed(&self, id: &PlayerId, day: i32) -> Result<(), RepoError>;
    async fn mark_claimed(
        &self,
        id: &PlayerId,
        day: i32,
        claimed_at: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    /// Timestamp of the most recent claim across all slots.
    async fn last_claim(&self, id: &PlayerId) -> Result<Option<DateTime<Utc>>, RepoError>;
}

// =============================================================================
// Battle Pass Progress Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BattlePassRepo: Send + Sync {
    async fn progress(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
    ) -> Result<Option<BattlePassProgress>, RepoError>;

    async fn insert(&self, id: &PlayerId, battle_pass_id: BattlePassId) -> Result<(), RepoError>;

    /// Add XP and return the updated row (level not yet recomputed).
    async fn add_xp(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        xp: i64,
    ) -> Result<BattlePassProgress, RepoError>;

    async fn set_level(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        level: i32,
    ) -> Result<(), RepoError>;

    async fn set_unlocked(
        &self,
        id: &PlayerId,
        battle_pass_id: BattlePassId,
        unlocked: bool,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Read-Only Catalogs
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn cosmetic(&self, id: CosmeticId) -> Result<Option<Cosmetic>, RepoError>;
    async fn cosmetic_by_name(&self, name: &str) -> Result<Option<Cosmetic>, RepoError>;
    async fn equip_group(&self, id: CosmeticId) -> Result<Option<String>, RepoError>;

    /// Weighted drop types for a chest, ordered by cumulative odds.
    /// The caller draws; the catalog never rolls.
    async fn chest_drop_types(&self, chest_id: CosmeticId)
        -> Result<Vec<ChestDropType>, RepoError>;
    async fn drop_type_rewards(&self, drop_type: &str) -> Result<Vec<DropTableEntry>, RepoError>;
    async fn chest_coin_rewards(
        &self,
        chest_id: CosmeticId,
    ) -> Result<Vec<CoinRewardEntry>, RepoError>;
    async fn chest_bonus_rewards(
        &self,
        chest_id: CosmeticId,
    ) -> Result<Vec<DropTableEntry>, RepoError>;

    async fn all_daily_quests(&self) -> Result<Vec<Quest>, RepoError>;
    async fn all_weekly_quests(&self) -> Result<Vec<Quest>, RepoError>;
    async fn all_achievements(&self) -> Result<Vec<Quest>, RepoError>;
    async fn login_quests(&self) -> Result<Vec<LoginQuest>, RepoError>;
    async fn quest(&self, id: QuestId) -> Result<Option<Quest>, RepoError>;
    async fn quests_with_stat(&self, stat: &str) -> Result<Vec<Quest>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BattlePassCatalogPort: Send + Sync {
    async fn active_battle_pass(&self) -> Result<Option<BattlePass>, RepoError>;
    async fn requirements_at_level(
        &self,
        battle_pass_id: BattlePassId,
        level: i32,
    ) -> Result<Option<LevelRequirement>, RepoError>;

    /// Largest level whose cumulative XP threshold is <= `total_xp`,
    /// capped at the season's max level.
    async fn calculate_level(
        &self,
        battle_pass_id: BattlePassId,
        total_xp: i64,
    ) -> Result<i32, RepoError>;

    /// Sum of rewards for every level in `[from, to]` inclusive.
    async fn rewards_in_range(
        &self,
        battle_pass_id: BattlePassId,
        from: i32,
        to: i32,
    ) -> Result<BattlePassRewards, RepoError>;
}

// =============================================================================
// Transaction Log
// =============================================================================

/// Append-only audit trail. Written before mutations, never read back
/// by this engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionLogPort: Send + Sync {
    async fn record(
        &self,
        id: &PlayerId,
        kind: &str,
        payload: serde_json::Value,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Clock / Random
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Every probability draw in the engine flows through this port so
/// outcomes are reproducible under test.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw in `min..=max`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
