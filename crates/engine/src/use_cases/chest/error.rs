//! Chest opening errors.

use arenaforge_domain::CosmeticId;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum ChestError {
    #[error("Cosmetic {0} not found in catalog")]
    CosmeticNotFound(CosmeticId),
    #[error("Cosmetic {0} is not a chest")]
    NotAChest(CosmeticId),
    #[error("Chest {0} not owned")]
    ItemNotOwned(CosmeticId),
    /// The drop table failed to cover the drawn value. Catalog data
    /// integrity failure, never a valid outcome.
    #[error("Reward table '{table}' exhausted at draw {draw}")]
    RewardTableExhausted { table: String, draw: i32 },
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
