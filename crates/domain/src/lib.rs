//! ArenaForge domain types.
//!
//! Pure progression/economy types with their invariants. No I/O and no
//! ambient state; everything here is storage- and transport-agnostic.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    AbilityResult, AssignedQuest, BattlePass, BattlePassProgress, BattlePassRewards, Cosmetic,
    CosmeticReward, CosmeticType, HeroResult, LevelRequirement, LoginQuest, LoginQuestAssignment,
    MatchRecord, OwnedCosmetic, Player, PlayerMatchResult, Quest, QuestAssignment, QuestCadence,
    Rarity, UserType, DAILY_REROLL_HOURS, DEFAULT_MMR, MAX_ABILITY_LEVEL, SUPER_ABILITY_LEVEL,
    WEEKLY_REROLL_HOURS,
};
pub use error::DomainError;
pub use ids::{BattlePassId, CosmeticId, PlayerId, QuestId};
pub use value_objects::{
    pick_by_cumulative, ChestDropType, CoinRewardEntry, CumulativeEntry, DropTableEntry, ItemDelta,
    OpenedChest, RewardBundle,
};
