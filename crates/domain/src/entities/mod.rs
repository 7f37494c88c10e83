//! Domain entities.

pub mod battle_pass;
pub mod cosmetic;
pub mod login;
pub mod match_result;
pub mod player;
pub mod quest;

pub use battle_pass::{
    BattlePass, BattlePassProgress, BattlePassRewards, CosmeticReward, LevelRequirement,
};
pub use cosmetic::{Cosmetic, CosmeticType, OwnedCosmetic, Rarity};
pub use login::{LoginQuest, LoginQuestAssignment};
pub use match_result::{
    AbilityResult, HeroResult, MatchRecord, PlayerMatchResult, MAX_ABILITY_LEVEL,
    SUPER_ABILITY_LEVEL,
};
pub use player::{Player, UserType, DEFAULT_MMR};
pub use quest::{
    AssignedQuest, Quest, QuestAssignment, QuestCadence, DAILY_REROLL_HOURS, WEEKLY_REROLL_HOURS,
};
