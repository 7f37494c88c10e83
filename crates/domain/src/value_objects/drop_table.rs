//! Weighted chest drop tables.
//!
//! Tables are ordered lists of entries carrying ascending cumulative
//! odds up to 100. A uniform draw in 1..=100 selects the first entry
//! whose cumulative threshold reaches the draw; ties break toward the
//! earlier entry because the sums are strictly ascending.

use serde::{Deserialize, Serialize};

use crate::entities::cosmetic::{Cosmetic, Rarity};
use crate::ids::CosmeticId;

/// An entry with a cumulative-odds threshold.
pub trait CumulativeEntry {
    fn cum_sum(&self) -> i32;
}

/// First entry whose cumulative threshold is >= the draw, if any.
pub fn pick_by_cumulative<T: CumulativeEntry>(entries: &[T], draw: i32) -> Option<&T> {
    entries.iter().find(|entry| entry.cum_sum() >= draw)
}

/// Weighted mapping from a chest to one of its named drop types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChestDropType {
    pub drop_type: String,
    pub cum_sum: i32,
}

impl CumulativeEntry for ChestDropType {
    fn cum_sum(&self) -> i32 {
        self.cum_sum
    }
}

/// Item-table entry: a nominal reward within a drop type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropTableEntry {
    pub reward_id: CosmeticId,
    pub cum_sum: i32,
}

impl CumulativeEntry for DropTableEntry {
    fn cum_sum(&self) -> i32 {
        self.cum_sum
    }
}

/// Coin-table entry: a flat coin payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinRewardEntry {
    pub coins: i64,
    pub cum_sum: i32,
}

impl CumulativeEntry for CoinRewardEntry {
    fn cum_sum(&self) -> i32 {
        self.cum_sum
    }
}

/// The resolved outcome of opening one chest, for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenedChest {
    pub items: Vec<Cosmetic>,
    pub coins: i64,
    pub pity_coins: i64,
    pub pity_rarities: Vec<(Rarity, i64)>,
}

impl OpenedChest {
    pub fn total_coins(&self) -> i64 {
        self.coins + self.pity_coins
    }
}
