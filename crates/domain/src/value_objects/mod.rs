//! Value objects.

pub mod drop_table;
pub mod reward_bundle;

pub use drop_table::{
    pick_by_cumulative, ChestDropType, CoinRewardEntry, CumulativeEntry, DropTableEntry,
    OpenedChest,
};
pub use reward_bundle::{ItemDelta, RewardBundle};
