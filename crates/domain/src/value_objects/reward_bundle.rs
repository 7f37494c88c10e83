//! Reward bundles: the single value through which economy state moves.
//!
//! Every multi-step economic event (chest opening, purchase, level-up
//! rewards) is expressed as one bundle and handed to the progression
//! ledger, instead of ad hoc per-call-site mutation sequences.

use serde::{Deserialize, Serialize};

use crate::ids::CosmeticId;

/// A signed item quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDelta {
    pub cosmetic_id: CosmeticId,
    /// Positive grants units, negative consumes them. Never zero.
    pub delta: i32,
}

/// Combined currency and item deltas applied as one logical unit of
/// work. Battle pass XP is carried separately because it is applied
/// through the battle pass engine, not the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    pub coins: i64,
    pub items: Vec<ItemDelta>,
}

impl RewardBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(mut self, coins: i64) -> Self {
        self.coins += coins;
        self
    }

    pub fn grant(mut self, cosmetic_id: CosmeticId, count: i32) -> Self {
        self.push(cosmetic_id, count);
        self
    }

    pub fn consume(mut self, cosmetic_id: CosmeticId, count: i32) -> Self {
        self.push(cosmetic_id, -count);
        self
    }

    fn push(&mut self, cosmetic_id: CosmeticId, delta: i32) {
        if delta == 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.cosmetic_id == cosmetic_id)
        {
            existing.delta += delta;
            if existing.delta == 0 {
                self.items.retain(|item| item.cosmetic_id != cosmetic_id);
            }
            return;
        }
        self.items.push(ItemDelta { cosmetic_id, delta });
    }

    pub fn is_empty(&self) -> bool {
        self.coins == 0 && self.items.is_empty()
    }
}
