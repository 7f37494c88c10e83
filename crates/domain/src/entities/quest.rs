//! Quest catalog entities and per-player assignments.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::QuestId;

/// Reroll cooldown for daily quests.
pub const DAILY_REROLL_HOURS: i64 = 23;
/// Reroll cooldown for weekly quests.
pub const WEEKLY_REROLL_HOURS: i64 = 168;

/// Quest cadence, derived from the catalog flags.
///
/// This is the single source of truth for "is this an achievement":
/// both initial assignment and reroll eligibility go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestCadence {
    Daily,
    Weekly,
    Achievement,
}

impl QuestCadence {
    /// How long an assignment must exist before it can be rerolled.
    /// Achievements are never rerolled.
    pub fn reroll_ttl(&self) -> Option<Duration> {
        match self {
            Self::Daily => Some(Duration::hours(DAILY_REROLL_HOURS)),
            Self::Weekly => Some(Duration::hours(WEEKLY_REROLL_HOURS)),
            Self::Achievement => None,
        }
    }
}

/// A quest catalog entry (read-only reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    /// The match-event counter this quest tracks (e.g. `rounds_won`).
    pub stat: String,
    pub required_amount: i32,
    pub coin_reward: i64,
    pub xp_reward: i64,
    pub is_weekly: bool,
    pub is_achievement: bool,
}

impl Quest {
    pub fn cadence(&self) -> QuestCadence {
        if self.is_achievement {
            QuestCadence::Achievement
        } else if self.is_weekly {
            QuestCadence::Weekly
        } else {
            QuestCadence::Daily
        }
    }
}

/// A player's slot row for one quest.
///
/// Progress is stored uncapped; the display layer caps it at the
/// required amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestAssignment {
    pub quest_id: QuestId,
    /// Slot index for daily/weekly quests; achievements have none.
    pub slot: Option<i32>,
    pub progress: i32,
    pub claimed: bool,
    /// Reset whenever the slot is rerolled.
    pub created_at: DateTime<Utc>,
}

/// A quest joined with the player's assignment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedQuest {
    pub quest: Quest,
    pub assignment: QuestAssignment,
}

impl AssignedQuest {
    pub fn is_complete(&self) -> bool {
        self.assignment.progress >= self.quest.required_amount
    }

    pub fn capped_progress(&self) -> i32 {
        self.assignment.progress.min(self.quest.required_amount)
    }

    /// Whether the reroll cooldown has elapsed. Always false for
    /// achievements.
    pub fn reroll_eligible(&self, now: DateTime<Utc>) -> bool {
        match self.quest.cadence().reroll_ttl() {
            Some(ttl) => now - self.assignment.created_at >= ttl,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_quest(id: i64, stat: &str) -> Quest {
        Quest {
            id: QuestId::new(id),
            name: format!("quest-{id}"),
            stat: stat.to_string(),
            required_amount: 5,
            coin_reward: 100,
            xp_reward: 50,
            is_weekly: false,
            is_achievement: false,
        }
    }

    fn assigned(quest: Quest, progress: i32, created_at: DateTime<Utc>) -> AssignedQuest {
        AssignedQuest {
            assignment: QuestAssignment {
                quest_id: quest.id,
                slot: Some(1),
                progress,
                claimed: false,
                created_at,
            },
            quest,
        }
    }

    #[test]
    fn cadence_prefers_achievement_over_weekly() {
        let mut quest = daily_quest(1, "rounds_won");
        quest.is_weekly = true;
        quest.is_achievement = true;
        assert_eq!(quest.cadence(), QuestCadence::Achievement);
        assert_eq!(quest.cadence().reroll_ttl(), None);
    }

    #[test]
    fn progress_caps_for_display_only() {
        let aq = assigned(daily_quest(1, "rounds_won"), 12, Utc::now());
        assert_eq!(aq.assignment.progress, 12);
        assert_eq!(aq.capped_progress(), 5);
        assert!(aq.is_complete());
    }

    #[test]
    fn daily_reroll_opens_after_23_hours() {
        let now = Utc::now();
        let fresh = assigned(daily_quest(1, "rounds_won"), 0, now - Duration::hours(22));
        let stale = assigned(daily_quest(2, "first_place"), 0, now - Duration::hours(23));
        assert!(!fresh.reroll_eligible(now));
        assert!(stale.reroll_eligible(now));
    }
}
