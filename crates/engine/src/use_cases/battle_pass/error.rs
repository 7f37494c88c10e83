//! Battle pass errors.

use crate::infrastructure::ports::RepoError;
use crate::use_cases::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum BattlePassError {
    #[error("No active battle pass season")]
    NoActiveSeason,
    #[error("Player has no progress row for the active season")]
    ProgressNotFound,
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
