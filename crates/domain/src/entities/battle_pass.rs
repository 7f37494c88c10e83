//! Battle pass seasons and per-player progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BattlePassId, CosmeticId};

/// A battle pass season (read-only reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattlePass {
    pub id: BattlePassId,
    pub max_level: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Per-player progress within one season.
///
/// `level` is derived from `total_xp` and is recomputed, never set
/// independently; both are monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattlePassProgress {
    pub battle_pass_id: BattlePassId,
    pub total_xp: i64,
    pub level: i32,
    /// Premium tier unlocked.
    pub unlocked: bool,
}

/// One cosmetic grant within a level-range reward set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmeticReward {
    pub cosmetic_id: CosmeticId,
    pub amount: i32,
}

/// Summed rewards for a contiguous range of battle pass levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePassRewards {
    pub cosmetics: Vec<CosmeticReward>,
    pub coins: i64,
}

impl BattlePassRewards {
    pub fn is_empty(&self) -> bool {
        self.cosmetics.is_empty() && self.coins == 0
    }
}

/// XP needed to move past a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirement {
    pub level: i32,
    pub next_level_xp: i64,
}
