//! Player account state.
//!
//! Coins and MMR mutate only through the progression ledger; this type
//! only carries the current snapshot plus small read-side helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

/// Default MMR for a freshly created account.
pub const DEFAULT_MMR: i32 = 1000;

/// Account tier, used by moderation tooling and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Standard,
    Tester,
    Moderator,
    Developer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Tester => "tester",
            Self::Moderator => "moderator",
            Self::Developer => "developer",
        }
    }

    /// Stored as text; unknown values fall back to `Standard` so a
    /// catalog edit can never lock a player out.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "tester" => Self::Tester,
            "moderator" => Self::Moderator,
            "developer" => Self::Developer,
            _ => Self::Standard,
        }
    }
}

/// A player account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub coins: i64,
    pub mmr: i32,
    pub user_type: UserType,
    /// Absent means "never purchased".
    pub plus_expiration: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: PlayerId, username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: username.into(),
            coins: 0,
            mmr: DEFAULT_MMR,
            user_type: UserType::Standard,
            plus_expiration: None,
            created_at: now,
        }
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.coins >= cost
    }

    pub fn has_active_plus(&self, now: DateTime<Utc>) -> bool {
        self.plus_expiration.is_some_and(|exp| exp > now)
    }
}
