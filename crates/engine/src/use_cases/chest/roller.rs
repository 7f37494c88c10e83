//! Weighted chest reward rolling.
//!
//! One chest open performs exactly one draw against the item table,
//! one against the coin table, and one against the bonus table. The
//! roller never retries a draw; a duplicate unique cosmetic converts
//! to pity coins instead of rerolling.

use std::sync::Arc;

use arenaforge_domain::{
    pick_by_cumulative, Cosmetic, CosmeticId, CosmeticType, OpenedChest, PlayerId, RewardBundle,
};

use crate::config::PityTable;
use crate::infrastructure::ports::{CatalogPort, InventoryRepo, RandomPort};
use crate::use_cases::chest::error::ChestError;

/// The outcome of rolling one chest: what the player sees and the
/// bundle the ledger must apply. The chest debit itself is added by
/// the resolver.
#[derive(Debug)]
pub struct ChestRoll {
    pub display: OpenedChest,
    pub bundle: RewardBundle,
}

pub struct RewardRoller {
    catalog: Arc<dyn CatalogPort>,
    inventory_repo: Arc<dyn InventoryRepo>,
    random: Arc<dyn RandomPort>,
    pity: PityTable,
    coin_min: i32,
    coin_max: i32,
}

impl RewardRoller {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        inventory_repo: Arc<dyn InventoryRepo>,
        random: Arc<dyn RandomPort>,
        pity: PityTable,
        coin_min: i32,
        coin_max: i32,
    ) -> Self {
        Self {
            catalog,
            inventory_repo,
            random,
            pity,
            coin_min,
            coin_max,
        }
    }

    /// Roll the full reward set for one chest. The item table must
    /// cover every possible draw; the coin and bonus tables may leave
    /// headroom, in which case that draw yields nothing.
    pub async fn roll(
        &self,
        player: &PlayerId,
        chest_id: CosmeticId,
    ) -> Result<ChestRoll, ChestError> {
        let mut display = OpenedChest::default();
        let mut bundle = RewardBundle::new();

        self.roll_item(player, chest_id, &mut display, &mut bundle)
            .await?;
        self.roll_coins(chest_id, &mut display, &mut bundle).await?;
        self.roll_bonus(chest_id, &mut display, &mut bundle).await?;

        Ok(ChestRoll { display, bundle })
    }

    async fn roll_item(
        &self,
        player: &PlayerId,
        chest_id: CosmeticId,
        display: &mut OpenedChest,
        bundle: &mut RewardBundle,
    ) -> Result<(), ChestError> {
        let drop_types = self.catalog.chest_drop_types(chest_id).await?;
        let draw = self.random.gen_range(1, 100);
        let drop_type = pick_by_cumulative(&drop_types, draw).ok_or_else(|| {
            ChestError::RewardTableExhausted {
                table: format!("drop_types:{chest_id}"),
                draw,
            }
        })?;

        let entries = self.catalog.drop_type_rewards(&drop_type.drop_type).await?;
        let draw = self.random.gen_range(1, 100);
        let entry = pick_by_cumulative(&entries, draw).ok_or_else(|| {
            ChestError::RewardTableExhausted {
                table: drop_type.drop_type.clone(),
                draw,
            }
        })?;

        let cosmetic = self
            .catalog
            .cosmetic(entry.reward_id)
            .await?
            .ok_or(ChestError::CosmeticNotFound(entry.reward_id))?;

        self.resolve_item(player, cosmetic, display, bundle).await
    }

    /// Apply the resolution rules to the nominally selected reward.
    async fn resolve_item(
        &self,
        player: &PlayerId,
        cosmetic: Cosmetic,
        display: &mut OpenedChest,
        bundle: &mut RewardBundle,
    ) -> Result<(), ChestError> {
        if cosmetic.cosmetic_type == CosmeticType::Currency {
            let coins = i64::from(self.random.gen_range(self.coin_min, self.coin_max));
            display.coins += coins;
            bundle.coins += coins;
            return Ok(());
        }

        if cosmetic.cosmetic_type.is_repeatable() || cosmetic.cosmetic_type.is_consumable() {
            *bundle = std::mem::take(bundle).grant(cosmetic.id, 1);
            display.items.push(cosmetic);
            return Ok(());
        }

        // Unique wearable: an owned duplicate converts to pity coins.
        let owned = self.inventory_repo.count_owned(player, cosmetic.id).await?;
        if owned > 0 {
            let coins = self.pity.coins_for(cosmetic.rarity);
            display.pity_coins += coins;
            display.pity_rarities.push((cosmetic.rarity, coins));
            bundle.coins += coins;
            tracing::debug!(
                player = %player,
                cosmetic = %cosmetic.id,
                rarity = cosmetic.rarity.as_str(),
                coins,
                "Duplicate chest reward converted to pity coins"
            );
        } else {
            *bundle = std::mem::take(bundle).grant(cosmetic.id, 1);
            display.items.push(cosmetic);
        }
        Ok(())
    }

    async fn roll_coins(
        &self,
        chest_id: CosmeticId,
        display: &mut OpenedChest,
        bundle: &mut RewardBundle,
    ) -> Result<(), ChestError> {
        let entries = self.catalog.chest_coin_rewards(chest_id).await?;
        if entries.is_empty() {
            return Ok(());
        }
        let draw = self.random.gen_range(1, 100);
        // Headroom below 100 is a designed "no coins" outcome here.
        if let Some(entry) = pick_by_cumulative(&entries, draw) {
            display.coins += entry.coins;
            bundle.coins += entry.coins;
        }
        Ok(())
    }

    async fn roll_bonus(
        &self,
        chest_id: CosmeticId,
        display: &mut OpenedChest,
        bundle: &mut RewardBundle,
    ) -> Result<(), ChestError> {
        let entries = self.catalog.chest_bonus_rewards(chest_id).await?;
        if entries.is_empty() {
            return Ok(());
        }
        let draw = self.random.gen_range(1, 100);
        if let Some(entry) = pick_by_cumulative(&entries, draw) {
            let cosmetic = self
                .catalog
                .cosmetic(entry.reward_id)
                .await?
                .ok_or(ChestError::CosmeticNotFound(entry.reward_id))?;
            *bundle = std::mem::take(bundle).grant(cosmetic.id, 1);
            display.items.push(cosmetic);
        }
        Ok(())
    }
}
