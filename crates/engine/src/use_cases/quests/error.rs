//! Quest tracking errors.

use arenaforge_domain::QuestId;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::battle_pass::BattlePassError;
use crate::use_cases::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Quest {0} not found in catalog")]
    QuestNotFound(QuestId),
    #[error("Quest {0} is not assigned to this player")]
    NotAssigned(QuestId),
    #[error("Quest slots already initialized")]
    AlreadyInitialized,
    #[error("Quest not complete: {progress}/{required}")]
    QuestNotComplete { progress: i32, required: i32 },
    #[error("Quest {0} already claimed")]
    AlreadyClaimed(QuestId),
    #[error("Quest {0} cannot be rerolled yet")]
    RerollNotEligible(QuestId),
    #[error("No replacement quest available")]
    NoReplacementAvailable,
    #[error("Login ladder slot {0} not found")]
    LoginSlotNotFound(i32),
    #[error("Login ladder slot {0} not completed")]
    LoginSlotNotComplete(i32),
    #[error("Login ladder slot {0} already claimed")]
    LoginSlotAlreadyClaimed(i32),
    #[error("Battle pass error: {0}")]
    BattlePass(#[from] BattlePassError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
