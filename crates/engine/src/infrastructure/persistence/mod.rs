//! Postgres adapters for the storage ports.
//!
//! All SQL lives here; the use cases never see a query string.

pub mod battle_pass_repository;
pub mod catalog_repository;
pub mod connection;
pub mod inventory_repository;
pub mod player_repository;
pub mod quest_repository;
pub mod transaction_log;

pub use battle_pass_repository::PgBattlePassRepo;
pub use catalog_repository::PgCatalog;
pub use connection::connect;
pub use inventory_repository::PgInventoryRepo;
pub use player_repository::PgPlayerRepo;
pub use quest_repository::{PgLoginQuestRepo, PgQuestRepo};
pub use transaction_log::PgTransactionLog;
