//! Login-streak quest ladder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CosmeticId;

/// One rung of the login ladder (read-only reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginQuest {
    /// 1-based day index within the ladder.
    pub day: i32,
    pub coin_reward: i64,
    pub cosmetic_reward: Option<CosmeticId>,
}

/// Per-player state for one ladder rung.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginQuestAssignment {
    pub day: i32,
    pub completed: bool,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
}
