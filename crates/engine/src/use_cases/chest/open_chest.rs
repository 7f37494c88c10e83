//! Chest opening: ownership check, roll, atomic debit-and-grant.

use std::sync::Arc;

use arenaforge_domain::{CosmeticId, OpenedChest, PlayerId};

use crate::infrastructure::ports::{CatalogPort, InventoryRepo};
use crate::use_cases::chest::error::ChestError;
use crate::use_cases::chest::roller::RewardRoller;
use crate::use_cases::ledger::ProgressionLedger;

pub struct ChestResolver {
    catalog: Arc<dyn CatalogPort>,
    inventory_repo: Arc<dyn InventoryRepo>,
    roller: Arc<RewardRoller>,
    ledger: Arc<ProgressionLedger>,
}

impl ChestResolver {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        inventory_repo: Arc<dyn InventoryRepo>,
        roller: Arc<RewardRoller>,
        ledger: Arc<ProgressionLedger>,
    ) -> Self {
        Self {
            catalog,
            inventory_repo,
            roller,
            ledger,
        }
    }

    /// Open one owned chest. The chest debit rides in the same bundle
    /// as the rewards, so exactly one unit is consumed on every path
    /// that grants anything.
    pub async fn open(
        &self,
        player: &PlayerId,
        chest_id: CosmeticId,
    ) -> Result<OpenedChest, ChestError> {
        let chest = self
            .catalog
            .cosmetic(chest_id)
            .await?
            .ok_or(ChestError::CosmeticNotFound(chest_id))?;
        if !chest.is_chest() {
            return Err(ChestError::NotAChest(chest_id));
        }

        let owned = self.inventory_repo.count_owned(player, chest_id).await?;
        if owned < 1 {
            return Err(ChestError::ItemNotOwned(chest_id));
        }

        let roll = self.roller.roll(player, chest_id).await?;
        let bundle = roll.bundle.consume(chest_id, 1);

        // A chest whose table yields the chest itself cancels its own
        // debit; the merged bundle is empty and nothing needs writing.
        if !bundle.is_empty() {
            self.ledger.apply(player, "open_chest", &bundle).await?;
        }

        tracing::info!(
            player = %player,
            chest = %chest_id,
            items = roll.display.items.len(),
            coins = roll.display.coins,
            pity_coins = roll.display.pity_coins,
            "Chest opened"
        );

        Ok(roll.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PityTable;
    use crate::infrastructure::ports::{
        MockCatalogPort, MockInventoryRepo, MockPlayerRepo, MockRandomPort,
        MockTransactionLogPort,
    };
    use arenaforge_domain::{ChestDropType, Cosmetic, CosmeticType, DropTableEntry, Rarity};
    use mockall::predicate::eq;

    const CHEST: CosmeticId = CosmeticId::new(1);
    const HAT: CosmeticId = CosmeticId::new(2);

    fn chest_cosmetic() -> Cosmetic {
        Cosmetic {
            id: CHEST,
            name: "Weathered Chest".into(),
            cosmetic_type: CosmeticType::Chest,
            rarity: Rarity::Rare,
            cost: 500,
            equip_group: None,
        }
    }

    fn hat_cosmetic() -> Cosmetic {
        Cosmetic {
            id: HAT,
            name: "Feathered Hat".into(),
            cosmetic_type: CosmeticType::Wearable,
            rarity: Rarity::Rare,
            cost: 0,
            equip_group: None,
        }
    }

    fn single_item_catalog() -> MockCatalogPort {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_cosmetic()
            .with(eq(CHEST))
            .returning(|_| Ok(Some(chest_cosmetic())));
        catalog.expect_chest_drop_types().returning(|_| {
            Ok(vec![ChestDropType {
                drop_type: "standard".into(),
                cum_sum: 100,
            }])
        });
        catalog.expect_drop_type_rewards().returning(|_| {
            Ok(vec![DropTableEntry {
                reward_id: HAT,
                cum_sum: 100,
            }])
        });
        catalog
            .expect_cosmetic()
            .with(eq(HAT))
            .returning(|_| Ok(Some(hat_cosmetic())));
        catalog.expect_chest_coin_rewards().returning(|_| Ok(vec![]));
        catalog.expect_chest_bonus_rewards().returning(|_| Ok(vec![]));
        catalog
    }

    fn resolver(
        catalog: MockCatalogPort,
        roll_inventory: MockInventoryRepo,
        owned_inventory: MockInventoryRepo,
        ledger_inventory: MockInventoryRepo,
        log: MockTransactionLogPort,
    ) -> ChestResolver {
        let catalog = Arc::new(catalog);
        let mut random = MockRandomPort::new();
        random.expect_gen_range().returning(|min, _| min);

        let roller = Arc::new(RewardRoller::new(
            catalog.clone(),
            Arc::new(roll_inventory),
            Arc::new(random),
            PityTable::default(),
            50,
            149,
        ));
        let ledger = Arc::new(ProgressionLedger::new(
            Arc::new(MockPlayerRepo::new()),
            Arc::new(ledger_inventory),
            Arc::new(log),
        ));
        ChestResolver::new(catalog, Arc::new(owned_inventory), roller, ledger)
    }

    #[tokio::test]
    async fn opening_debits_exactly_one_chest_unit() {
        let mut roll_inventory = MockInventoryRepo::new();
        roll_inventory.expect_count_owned().returning(|_, _| Ok(0));

        let mut owned_inventory = MockInventoryRepo::new();
        owned_inventory
            .expect_count_owned()
            .with(eq(PlayerId::new("p1")), eq(CHEST))
            .returning(|_, _| Ok(2));

        let mut ledger_inventory = MockInventoryRepo::new();
        ledger_inventory
            .expect_insert_unit()
            .with(eq(PlayerId::new("p1")), eq(HAT))
            .once()
            .returning(|_, _| Ok(()));
        ledger_inventory
            .expect_count_owned()
            .with(eq(PlayerId::new("p1")), eq(CHEST))
            .returning(|_, _| Ok(2));
        ledger_inventory
            .expect_delete_unit()
            .with(eq(PlayerId::new("p1")), eq(CHEST))
            .once()
            .returning(|_, _| Ok(true));

        let mut log = MockTransactionLogPort::new();
        log.expect_record()
            .withf(|id, kind, _| id.as_str() == "p1" && kind == "open_chest")
            .once()
            .returning(|_, _, _| Ok(()));

        let resolver = resolver(
            single_item_catalog(),
            roll_inventory,
            owned_inventory,
            ledger_inventory,
            log,
        );
        let opened = resolver.open(&PlayerId::new("p1"), CHEST).await.unwrap();
        assert_eq!(opened.items.len(), 1);
        assert_eq!(opened.items[0].name, "Feathered Hat");
    }

    #[tokio::test]
    async fn rolling_the_chest_itself_cancels_the_debit() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_cosmetic()
            .with(eq(CHEST))
            .returning(|_| Ok(Some(chest_cosmetic())));
        catalog.expect_chest_drop_types().returning(|_| {
            Ok(vec![ChestDropType {
                drop_type: "chests".into(),
                cum_sum: 100,
            }])
        });
        catalog.expect_drop_type_rewards().returning(|_| {
            Ok(vec![DropTableEntry {
                reward_id: CHEST,
                cum_sum: 100,
            }])
        });
        catalog.expect_chest_coin_rewards().returning(|_| Ok(vec![]));
        catalog.expect_chest_bonus_rewards().returning(|_| Ok(vec![]));

        let mut owned_inventory = MockInventoryRepo::new();
        owned_inventory
            .expect_count_owned()
            .with(eq(PlayerId::new("p1")), eq(CHEST))
            .returning(|_, _| Ok(1));

        // No ledger or log expectations: the grant and the debit
        // cancel, so any write would panic.
        let resolver = resolver(
            catalog,
            MockInventoryRepo::new(),
            owned_inventory,
            MockInventoryRepo::new(),
            MockTransactionLogPort::new(),
        );
        let opened = resolver.open(&PlayerId::new("p1"), CHEST).await.unwrap();
        assert_eq!(opened.items.len(), 1);
        assert_eq!(opened.items[0].name, "Weathered Chest");
    }

    #[tokio::test]
    async fn unowned_chest_is_rejected_before_rolling() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_cosmetic()
            .with(eq(CHEST))
            .returning(|_| Ok(Some(chest_cosmetic())));
        // No drop table expectations: a roll would panic.

        let mut owned_inventory = MockInventoryRepo::new();
        owned_inventory.expect_count_owned().returning(|_, _| Ok(0));

        let resolver = resolver(
            catalog,
            MockInventoryRepo::new(),
            owned_inventory,
            MockInventoryRepo::new(),
            MockTransactionLogPort::new(),
        );
        let result = resolver.open(&PlayerId::new("p1"), CHEST).await;
        assert!(matches!(result, Err(ChestError::ItemNotOwned(id)) if id == CHEST));
    }

    #[tokio::test]
    async fn opening_a_non_chest_is_rejected() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_cosmetic()
            .with(eq(HAT))
            .returning(|_| Ok(Some(hat_cosmetic())));

        let resolver = resolver(
            catalog,
            MockInventoryRepo::new(),
            MockInventoryRepo::new(),
            MockInventoryRepo::new(),
            MockTransactionLogPort::new(),
        );
        let result = resolver.open(&PlayerId::new("p1"), HAT).await;
        assert!(matches!(result, Err(ChestError::NotAChest(id)) if id == HAT));
    }
}
