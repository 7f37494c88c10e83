//! Ledger errors.

use arenaforge_domain::CosmeticId;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Insufficient funds: balance {balance}, delta {delta}")]
    InsufficientFunds { balance: i64, delta: i64 },
    #[error("Item {cosmetic_id} not owned in sufficient quantity: owned {owned}, requested {requested}")]
    ItemNotOwned {
        cosmetic_id: CosmeticId,
        owned: i64,
        requested: u32,
    },
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
