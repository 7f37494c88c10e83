//! Progression ledger: the single point through which coins and item
//! ownership mutate.
//!
//! A multi-item bundle is applied as an ordered sequence of independent
//! writes; there is no rollback once the first write lands. The audit
//! log entry is always written before the first mutation, so every
//! applied change has a log entry (a log entry may exist for a bundle
//! that later failed partway - that is the documented trade-off).

pub mod error;

use std::sync::Arc;

use arenaforge_domain::{CosmeticId, PlayerId, RewardBundle};

use crate::infrastructure::ports::{InventoryRepo, PlayerRepo, TransactionLogPort};

pub use error::LedgerError;

pub struct ProgressionLedger {
    player_repo: Arc<dyn PlayerRepo>,
    inventory_repo: Arc<dyn InventoryRepo>,
    log: Arc<dyn TransactionLogPort>,
}

impl ProgressionLedger {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        inventory_repo: Arc<dyn InventoryRepo>,
        log: Arc<dyn TransactionLogPort>,
    ) -> Self {
        Self {
            player_repo,
            inventory_repo,
            log,
        }
    }

    /// Apply a coin delta. Zero is a no-op; a delta that would drive
    /// the balance negative is rejected before any write.
    pub async fn apply_currency_delta(
        &self,
        player: &PlayerId,
        amount: i64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }

        if amount < 0 {
            let current = self
                .player_repo
                .get(player)
                .await?
                .ok_or(LedgerError::PlayerNotFound)?;
            if !current.can_afford(-amount) {
                return Err(LedgerError::InsufficientFunds {
                    balance: current.coins,
                    delta: amount,
                });
            }
        }

        self.player_repo.add_coins(player, amount).await?;
        Ok(())
    }

    /// Grant `count` independent ownership units.
    pub async fn grant_item(
        &self,
        player: &PlayerId,
        cosmetic_id: CosmeticId,
        count: u32,
    ) -> Result<(), LedgerError> {
        for _ in 0..count {
            self.inventory_repo.insert_unit(player, cosmetic_id).await?;
        }
        Ok(())
    }

    /// Remove `count` arbitrarily chosen units. All-or-nothing from the
    /// caller's perspective: ownership is verified before the first
    /// delete, even though the deletes themselves are issued one unit
    /// at a time.
    pub async fn remove_item(
        &self,
        player: &PlayerId,
        cosmetic_id: CosmeticId,
        count: u32,
    ) -> Result<(), LedgerError> {
        let owned = self.inventory_repo.count_owned(player, cosmetic_id).await?;
        if owned < count as i64 {
            return Err(LedgerError::ItemNotOwned {
                cosmetic_id,
                owned,
                requested: count,
            });
        }

        for removed in 0..count {
            let deleted = self.inventory_repo.delete_unit(player, cosmetic_id).await?;
            if !deleted {
                // A concurrent removal won the race after our count.
                tracing::error!(
                    player = %player,
                    cosmetic_id = %cosmetic_id,
                    removed,
                    requested = count,
                    "Item removal stopped partway"
                );
                return Err(LedgerError::ItemNotOwned {
                    cosmetic_id,
                    owned,
                    requested: count,
                });
            }
        }
        Ok(())
    }

    /// Apply a full reward bundle: audit log first, then coins, then
    /// item deltas in order.
    pub async fn apply(
        &self,
        player: &PlayerId,
        kind: &str,
        bundle: &RewardBundle,
    ) -> Result<(), LedgerError> {
        if bundle.is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "empty reward bundle".into(),
            ));
        }

        let payload = serde_json::to_value(bundle)
            .map_err(|err| LedgerError::InvalidTransaction(err.to_string()))?;
        self.log.record(player, kind, payload).await?;

        let mut applied_any = false;
        let result = self.apply_steps(player, bundle, &mut applied_any).await;
        if result.is_err() && applied_any {
            tracing::error!(
                player = %player,
                kind,
                "Reward bundle partially applied"
            );
        }
        result
    }

    async fn apply_steps(
        &self,
        player: &PlayerId,
        bundle: &RewardBundle,
        applied_any: &mut bool,
    ) -> Result<(), LedgerError> {
        if bundle.coins != 0 {
            self.apply_currency_delta(player, bundle.coins).await?;
            *applied_any = true;
        }

        for item in &bundle.items {
            if item.delta > 0 {
                self.grant_item(player, item.cosmetic_id, item.delta as u32)
                    .await?;
            } else {
                self.remove_item(player, item.cosmetic_id, item.delta.unsigned_abs())
                    .await?;
            }
            *applied_any = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockInventoryRepo, MockPlayerRepo, MockTransactionLogPort,
    };
    use arenaforge_domain::Player;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn player_with_coins(coins: i64) -> Player {
        let mut player = Player::new(PlayerId::new("p1"), "tester", Utc::now());
        player.coins = coins;
        player
    }

    fn ledger(
        player_repo: MockPlayerRepo,
        inventory_repo: MockInventoryRepo,
        log: MockTransactionLogPort,
    ) -> ProgressionLedger {
        ProgressionLedger::new(Arc::new(player_repo), Arc::new(inventory_repo), Arc::new(log))
    }

    #[tokio::test]
    async fn zero_delta_is_a_no_op() {
        // No expectations: any repo call would panic.
        let ledger = ledger(
            MockPlayerRepo::new(),
            MockInventoryRepo::new(),
            MockTransactionLogPort::new(),
        );
        let result = ledger
            .apply_currency_delta(&PlayerId::new("p1"), 0)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn positive_delta_skips_balance_check() {
        let mut player_repo = MockPlayerRepo::new();
        player_repo
            .expect_add_coins()
            .withf(|id, delta| id.as_str() == "p1" && *delta == 100)
            .once()
            .returning(|_, _| Ok(()));

        let ledger = ledger(player_repo, MockInventoryRepo::new(), MockTransactionLogPort::new());
        assert!(ledger
            .apply_currency_delta(&PlayerId::new("p1"), 100)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn overdraw_is_rejected_before_mutation() {
        let mut player_repo = MockPlayerRepo::new();
        player_repo
            .expect_get()
            .returning(|_| Ok(Some(player_with_coins(50))));
        // No add_coins expectation: a write would panic the test.

        let ledger = ledger(player_repo, MockInventoryRepo::new(), MockTransactionLogPort::new());
        let result = ledger
            .apply_currency_delta(&PlayerId::new("p1"), -100)
            .await;
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds {
                balance: 50,
                delta: -100
            })
        ));
    }

    #[tokio::test]
    async fn spend_down_to_exactly_zero_is_allowed() {
        let mut player_repo = MockPlayerRepo::new();
        player_repo
            .expect_get()
            .returning(|_| Ok(Some(player_with_coins(100))));
        player_repo
            .expect_add_coins()
            .with(eq(PlayerId::new("p1")), eq(-100))
            .once()
            .returning(|_, _| Ok(()));

        let ledger = ledger(player_repo, MockInventoryRepo::new(), MockTransactionLogPort::new());
        assert!(ledger
            .apply_currency_delta(&PlayerId::new("p1"), -100)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn grant_inserts_one_unit_per_count() {
        let mut inventory_repo = MockInventoryRepo::new();
        inventory_repo
            .expect_insert_unit()
            .with(eq(PlayerId::new("p1")), eq(CosmeticId::new(7)))
            .times(3)
            .returning(|_, _| Ok(()));

        let ledger = ledger(MockPlayerRepo::new(), inventory_repo, MockTransactionLogPort::new());
        assert!(ledger
            .grant_item(&PlayerId::new("p1"), CosmeticId::new(7), 3)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn remove_more_than_owned_is_all_or_nothing() {
        let mut inventory_repo = MockInventoryRepo::new();
        inventory_repo
            .expect_count_owned()
            .returning(|_, _| Ok(1));
        // No delete_unit expectation: partial removal must not happen.

        let ledger = ledger(MockPlayerRepo::new(), inventory_repo, MockTransactionLogPort::new());
        let result = ledger
            .remove_item(&PlayerId::new("p1"), CosmeticId::new(7), 2)
            .await;
        assert!(matches!(
            result,
            Err(LedgerError::ItemNotOwned {
                owned: 1,
                requested: 2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn empty_bundle_is_invalid_and_unlogged() {
        let ledger = ledger(
            MockPlayerRepo::new(),
            MockInventoryRepo::new(),
            MockTransactionLogPort::new(),
        );
        let result = ledger
            .apply(&PlayerId::new("p1"), "transaction", &RewardBundle::new())
            .await;
        assert!(matches!(result, Err(LedgerError::InvalidTransaction(_))));
    }

    #[tokio::test]
    async fn bundle_is_logged_before_any_write() {
        let mut seq = mockall::Sequence::new();

        let mut log = MockTransactionLogPort::new();
        log.expect_record()
            .withf(|id, kind, _| id.as_str() == "p1" && kind == "open_chest")
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut player_repo = MockPlayerRepo::new();
        player_repo
            .expect_add_coins()
            .with(eq(PlayerId::new("p1")), eq(150))
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut inventory_repo = MockInventoryRepo::new();
        inventory_repo
            .expect_insert_unit()
            .with(eq(PlayerId::new("p1")), eq(CosmeticId::new(9)))
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let ledger = ledger(player_repo, inventory_repo, log);
        let bundle = RewardBundle::new().with_coins(150).grant(CosmeticId::new(9), 1);
        assert!(ledger.apply(&PlayerId::new("p1"), "open_chest", &bundle).await.is_ok());
    }

    #[tokio::test]
    async fn chest_bundle_debits_chest_and_grants_reward() {
        let chest = CosmeticId::new(3);
        let reward = CosmeticId::new(11);

        let mut log = MockTransactionLogPort::new();
        log.expect_record().returning(|_, _, _| Ok(()));

        let mut inventory_repo = MockInventoryRepo::new();
        inventory_repo
            .expect_insert_unit()
            .with(eq(PlayerId::new("p1")), eq(reward))
            .once()
            .returning(|_, _| Ok(()));
        inventory_repo
            .expect_count_owned()
            .with(eq(PlayerId::new("p1")), eq(chest))
            .once()
            .returning(|_, _| Ok(1));
        inventory_repo
            .expect_delete_unit()
            .with(eq(PlayerId::new("p1")), eq(chest))
            .once()
            .returning(|_, _| Ok(true));

        let ledger = ledger(MockPlayerRepo::new(), inventory_repo, log);
        let bundle = RewardBundle::new().grant(reward, 1).consume(chest, 1);
        assert!(ledger.apply(&PlayerId::new("p1"), "open_chest", &bundle).await.is_ok());
    }
}
