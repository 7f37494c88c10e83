//! Post-match result events fed into quest progress and rewards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

/// Ability level that counts as a "super".
pub const SUPER_ABILITY_LEVEL: i32 = 6;
/// Maximum ability level.
pub const MAX_ABILITY_LEVEL: i32 = 9;

/// One ability a hero ended the match with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbilityResult {
    pub level: i32,
}

/// One hero the player fielded during a match.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeroResult {
    pub abilities: Vec<AbilityResult>,
}

/// A single player's outcome of one finished match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatchResult {
    pub player: PlayerId,
    /// Final placement, 1 is first.
    pub placement: i32,
    pub round_wins: i32,
    pub heroes: Vec<HeroResult>,
    pub mmr_delta: i32,
}

impl PlayerMatchResult {
    fn abilities(&self) -> impl Iterator<Item = &AbilityResult> {
        self.heroes.iter().flat_map(|hero| hero.abilities.iter())
    }

    /// Progress earned toward a quest stat by this result. Unknown
    /// stats earn nothing.
    pub fn progress_for_stat(&self, stat: &str) -> i32 {
        match stat {
            "games_played" => 1,
            "first_place" => i32::from(self.placement == 1),
            "top_four" => i32::from(self.placement <= 4),
            "rounds_won" => self.round_wins,
            "abilities_maxed" => self
                .abilities()
                .filter(|ability| ability.level == MAX_ABILITY_LEVEL)
                .count() as i32,
            "abilities_supered" => self
                .abilities()
                .filter(|ability| ability.level >= SUPER_ABILITY_LEVEL)
                .count() as i32,
            _ => 0,
        }
    }
}

/// A finished match as read back for history views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub game_id: i64,
    pub placement: i32,
    pub round_wins: i32,
    pub xp_earned: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(placement: i32, wins: i32, ability_levels: &[i32]) -> PlayerMatchResult {
        PlayerMatchResult {
            player: PlayerId::new("p1"),
            placement,
            round_wins: wins,
            heroes: vec![HeroResult {
                abilities: ability_levels
                    .iter()
                    .map(|&level| AbilityResult { level })
                    .collect(),
            }],
            mmr_delta: 0,
        }
    }

    #[test]
    fn placement_stats_respect_thresholds() {
        let first = result(1, 4, &[]);
        assert_eq!(first.progress_for_stat("first_place"), 1);
        assert_eq!(first.progress_for_stat("top_four"), 1);

        let fifth = result(5, 2, &[]);
        assert_eq!(fifth.progress_for_stat("first_place"), 0);
        assert_eq!(fifth.progress_for_stat("top_four"), 0);
        assert_eq!(fifth.progress_for_stat("games_played"), 1);
        assert_eq!(fifth.progress_for_stat("rounds_won"), 2);
    }

    #[test]
    fn ability_stats_count_levels_across_heroes() {
        let mut res = result(3, 1, &[9, 6, 5]);
        res.heroes.push(HeroResult {
            abilities: vec![AbilityResult { level: 7 }],
        });
        assert_eq!(res.progress_for_stat("abilities_maxed"), 1);
        assert_eq!(res.progress_for_stat("abilities_supered"), 3);
    }

    #[test]
    fn unknown_stat_earns_nothing() {
        assert_eq!(result(1, 1, &[]).progress_for_stat("towers_razed"), 0);
    }
}
