//! Use cases: the progression core, one module per component.

pub mod battle_pass;
pub mod chest;
pub mod ledger;
pub mod players;
pub mod quests;

pub use battle_pass::{BattlePassEngine, BattlePassError};
pub use chest::{ChestError, ChestResolver, RewardRoller};
pub use ledger::{LedgerError, ProgressionLedger};
pub use players::{PlayerError, PlayerFacade};
pub use quests::{LoginLadder, QuestError, QuestTracker};
