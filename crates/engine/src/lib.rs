//! ArenaForge Engine library.
//!
//! Server-side progression and economy logic for ArenaForge.
//!
//! ## Structure
//!
//! - `use_cases/` - The progression core: ledger, battle pass, quests,
//!   chests and the player facade
//! - `infrastructure/` - Ports and their Postgres adapters
//! - `config` - Engine configuration
//! - `app` - Application composition, consumed by the API layer

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for a binary embedding the engine.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arenaforge_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
