//! Player facade errors.

use arenaforge_domain::CosmeticId;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::battle_pass::BattlePassError;
use crate::use_cases::ledger::LedgerError;
use crate::use_cases::quests::QuestError;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Player already exists")]
    PlayerAlreadyExists,
    #[error("Cosmetic {0} not found in catalog")]
    CosmeticNotFound(CosmeticId),
    #[error("Cosmetic {0} cannot be bought with coins")]
    NotPurchasable(CosmeticId),
    #[error("Cosmetic {0} already owned")]
    AlreadyOwned(CosmeticId),
    #[error("Cosmetic {0} is not consumable")]
    NotConsumable(CosmeticId),
    #[error("Cosmetic {0} not owned")]
    ItemNotOwned(CosmeticId),
    #[error("Unknown purchase kind: {0}")]
    UnknownPurchaseKind(String),
    #[error("Battle pass error: {0}")]
    BattlePass(#[from] BattlePassError),
    #[error("Quest error: {0}")]
    Quest(#[from] QuestError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
