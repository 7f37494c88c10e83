//! Cosmetic catalog entities and ownership units.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CosmeticId;

/// Item rarity tier. Ordering matters for pity-coin lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythical,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Mythical => "Mythical",
            Self::Legendary => "Legendary",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "Common" => Ok(Self::Common),
            "Uncommon" => Ok(Self::Uncommon),
            "Rare" => Ok(Self::Rare),
            "Mythical" => Ok(Self::Mythical),
            "Legendary" => Ok(Self::Legendary),
            other => Err(DomainError::parse(format!("unknown rarity: {other}"))),
        }
    }
}

/// Catalog classification of a cosmetic.
///
/// The type drives purchase, consumption, and chest-roll rules; any
/// catalog value outside the special set is a plain wearable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CosmeticType {
    /// Openable container resolving to a randomized reward bundle.
    Chest,
    /// Consumable granting battle pass XP.
    Xp,
    /// Consumable granting battle pass XP, dropped only from chests.
    ChestXp,
    /// Repeatable battle pass progression booster.
    BpAccelerator,
    /// Placeholder entry in drop tables that resolves to coins.
    Currency,
    /// Everything else: unique-per-player wearable cosmetics.
    Wearable,
}

impl CosmeticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Xp => "XP",
            Self::ChestXp => "Chest XP",
            Self::BpAccelerator => "BP Accelerator",
            Self::Currency => "Currency",
            Self::Wearable => "Wearable",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "Chest" => Self::Chest,
            "XP" => Self::Xp,
            "Chest XP" => Self::ChestXp,
            "BP Accelerator" => Self::BpAccelerator,
            "Currency" => Self::Currency,
            _ => Self::Wearable,
        }
    }

    /// Types a player may own (and buy) more than one unit of.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Chest | Self::Xp | Self::BpAccelerator)
    }

    /// Types that can be consumed for battle pass XP.
    pub fn is_consumable(&self) -> bool {
        matches!(self, Self::Xp | Self::ChestXp)
    }
}

/// A cosmetic catalog entry (read-only reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cosmetic {
    pub id: CosmeticId,
    pub name: String,
    pub cosmetic_type: CosmeticType,
    pub rarity: Rarity,
    /// Coin price; zero or negative means not purchasable with coins.
    pub cost: i64,
    /// Cosmetics in the same equip group are mutually exclusive when
    /// equipped.
    pub equip_group: Option<String>,
}

impl Cosmetic {
    pub fn is_chest(&self) -> bool {
        self.cosmetic_type == CosmeticType::Chest
    }

    pub fn is_coin_purchasable(&self) -> bool {
        self.cost >= 1
    }
}

/// One owned unit of a cosmetic in a player inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedCosmetic {
    pub cosmetic: Cosmetic,
    pub equipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_is_wearable() {
        assert_eq!(CosmeticType::parse("Announcer Pack"), CosmeticType::Wearable);
        assert_eq!(CosmeticType::parse("Chest"), CosmeticType::Chest);
    }

    #[test]
    fn repeatable_and_consumable_sets_match_catalog_rules() {
        assert!(CosmeticType::Chest.is_repeatable());
        assert!(CosmeticType::BpAccelerator.is_repeatable());
        assert!(!CosmeticType::Wearable.is_repeatable());

        assert!(CosmeticType::Xp.is_consumable());
        assert!(CosmeticType::ChestXp.is_consumable());
        assert!(!CosmeticType::Chest.is_consumable());
    }

    #[test]
    fn rarity_parse_rejects_unknown() {
        assert!(Rarity::parse("Ultra").is_err());
        assert_eq!(Rarity::parse("Legendary"), Ok(Rarity::Legendary));
    }
}
