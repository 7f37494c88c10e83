//! Commerce operations: coin purchases, equipping, consumables and
//! post-payment grants.

use arenaforge_domain::{Cosmetic, CosmeticId, PlayerId, RewardBundle};

use crate::use_cases::battle_pass::BattlePassError;
use crate::use_cases::ledger::LedgerError;
use crate::use_cases::players::{PlayerError, PlayerFacade};

/// What a real-money payment grants once the (external) payment
/// processor has confirmed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealMoneyKind {
    Coins,
    BattlePassXp,
    PlusDays,
}

impl RealMoneyKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "coins" => Some(Self::Coins),
            "battle_pass_xp" => Some(Self::BattlePassXp),
            "plus_days" => Some(Self::PlusDays),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::BattlePassXp => "battle_pass_xp",
            Self::PlusDays => "plus_days",
        }
    }
}

impl PlayerFacade {
    /// Buy a catalog cosmetic with coins. Non-repeatable types are
    /// limited to one owned unit; the debit and the grant ride the
    /// same logged bundle.
    pub async fn buy_cosmetic(
        &self,
        player: &PlayerId,
        cosmetic_id: CosmeticId,
    ) -> Result<Cosmetic, PlayerError> {
        let cosmetic = self
            .catalog
            .cosmetic(cosmetic_id)
            .await?
            .ok_or(PlayerError::CosmeticNotFound(cosmetic_id))?;
        if !cosmetic.is_coin_purchasable() {
            return Err(PlayerError::NotPurchasable(cosmetic_id));
        }

        if !cosmetic.cosmetic_type.is_repeatable() {
            let owned = self.inventory_repo.count_owned(player, cosmetic_id).await?;
            if owned > 0 {
                return Err(PlayerError::AlreadyOwned(cosmetic_id));
            }
        }

        let bundle = RewardBundle::new()
            .with_coins(-cosmetic.cost)
            .grant(cosmetic_id, 1);
        self.ledger.apply(player, "coins_purchase", &bundle).await?;

        tracing::info!(
            player = %player,
            cosmetic = %cosmetic_id,
            cost = cosmetic.cost,
            "Cosmetic purchased"
        );
        Ok(cosmetic)
    }

    /// Equip or unequip an owned cosmetic. Equipping first unequips
    /// every other owned unit in the same equip group.
    pub async fn equip_cosmetic(
        &self,
        player: &PlayerId,
        cosmetic_id: CosmeticId,
        equipped: bool,
    ) -> Result<(), PlayerError> {
        let owned = self.inventory_repo.count_owned(player, cosmetic_id).await?;
        if owned < 1 {
            return Err(PlayerError::ItemNotOwned(cosmetic_id));
        }

        if equipped {
            if let Some(group) = self.catalog.equip_group(cosmetic_id).await? {
                self.inventory_repo.unequip_group(player, &group).await?;
            }
        }
        self.inventory_repo
            .set_equipped(player, cosmetic_id, equipped)
            .await?;
        Ok(())
    }

    /// Consume one owned XP item for battle pass XP.
    pub async fn consume_item(
        &self,
        player: &PlayerId,
        cosmetic_id: CosmeticId,
    ) -> Result<i64, PlayerError> {
        let cosmetic = self
            .catalog
            .cosmetic(cosmetic_id)
            .await?
            .ok_or(PlayerError::CosmeticNotFound(cosmetic_id))?;
        if !cosmetic.cosmetic_type.is_consumable() {
            return Err(PlayerError::NotConsumable(cosmetic_id));
        }

        let owned = self.inventory_repo.count_owned(player, cosmetic_id).await?;
        if owned < 1 {
            return Err(PlayerError::ItemNotOwned(cosmetic_id));
        }

        let bundle = RewardBundle::new().consume(cosmetic_id, 1);
        self.ledger.apply(player, "consume_item", &bundle).await?;
        self.battle_pass.add_xp(player, self.consumable_xp).await?;

        tracing::info!(
            player = %player,
            cosmetic = %cosmetic_id,
            xp = self.consumable_xp,
            "Item consumed"
        );
        Ok(self.consumable_xp)
    }

    /// Grant what a confirmed real-money payment bought. Payment
    /// processing itself happens upstream; this is only the fulfilment
    /// step.
    pub async fn real_money_purchase(
        &self,
        player: &PlayerId,
        kind: &str,
        amount: i64,
    ) -> Result<(), PlayerError> {
        let kind = RealMoneyKind::parse(kind)
            .ok_or_else(|| PlayerError::UnknownPurchaseKind(kind.to_string()))?;
        if amount <= 0 {
            return Err(PlayerError::Ledger(LedgerError::InvalidTransaction(
                format!("non-positive purchase amount {amount}"),
            )));
        }

        self.log
            .record(
                player,
                "real_money_purchase",
                serde_json::json!({ "kind": kind.as_str(), "amount": amount }),
            )
            .await?;

        match kind {
            RealMoneyKind::Coins => {
                self.ledger.apply_currency_delta(player, amount).await?;
            }
            RealMoneyKind::BattlePassXp => {
                self.battle_pass.add_xp(player, amount).await?;
            }
            RealMoneyKind::PlusDays => {
                self.player_repo.extend_plus(player, amount).await?;
                // Off-season purchases still extend the subscription.
                match self.battle_pass.unlock_premium(player).await {
                    Ok(()) | Err(BattlePassError::NoActiveSeason) => {}
                    Err(err) => return Err(err.into()),
                }
            }
        }

        tracing::info!(player = %player, kind = kind.as_str(), amount, "Purchase fulfilled");
        Ok(())
    }
}
