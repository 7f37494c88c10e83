//! Application state and composition.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EngineConfig;
use crate::infrastructure::clock::{SystemClock, SystemRandom};
use crate::infrastructure::persistence::{
    PgBattlePassRepo, PgCatalog, PgInventoryRepo, PgLoginQuestRepo, PgPlayerRepo, PgQuestRepo,
    PgTransactionLog,
};
use crate::infrastructure::ports::{
    BattlePassCatalogPort, BattlePassRepo, CatalogPort, ClockPort, InventoryRepo, LoginQuestRepo,
    PlayerRepo, QuestRepo, RandomPort, TransactionLogPort,
};
use crate::use_cases::{
    BattlePassEngine, ChestResolver, LoginLadder, PlayerFacade, ProgressionLedger, QuestTracker,
    RewardRoller,
};

/// Main application state.
///
/// Holds the wired ports and use cases. Passed to the (external) API
/// layer.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the storage and catalog ports.
pub struct Repositories {
    pub players: Arc<dyn PlayerRepo>,
    pub inventory: Arc<dyn InventoryRepo>,
    pub quests: Arc<dyn QuestRepo>,
    pub login_quests: Arc<dyn LoginQuestRepo>,
    pub battle_pass: Arc<dyn BattlePassRepo>,
    pub catalog: Arc<dyn CatalogPort>,
    pub battle_pass_catalog: Arc<dyn BattlePassCatalogPort>,
    pub transaction_log: Arc<dyn TransactionLogPort>,
}

/// Container for the progression use cases.
pub struct UseCases {
    pub ledger: Arc<ProgressionLedger>,
    pub battle_pass: Arc<BattlePassEngine>,
    pub quests: Arc<QuestTracker>,
    pub login: Arc<LoginLadder>,
    pub chests: Arc<ChestResolver>,
    pub players: Arc<PlayerFacade>,
}

impl App {
    /// Wire every adapter and use case over one connection pool.
    pub fn new(pool: PgPool, config: &EngineConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

        let players: Arc<dyn PlayerRepo> = Arc::new(PgPlayerRepo::new(pool.clone()));
        let inventory: Arc<dyn InventoryRepo> = Arc::new(PgInventoryRepo::new(pool.clone()));
        let quests_repo: Arc<dyn QuestRepo> = Arc::new(PgQuestRepo::new(pool.clone()));
        let login_quests: Arc<dyn LoginQuestRepo> = Arc::new(PgLoginQuestRepo::new(pool.clone()));
        let battle_pass_repo: Arc<dyn BattlePassRepo> =
            Arc::new(PgBattlePassRepo::new(pool.clone()));
        let catalog_adapter = Arc::new(PgCatalog::new(pool.clone()));
        let catalog: Arc<dyn CatalogPort> = catalog_adapter.clone();
        let battle_pass_catalog: Arc<dyn BattlePassCatalogPort> = catalog_adapter;
        let transaction_log: Arc<dyn TransactionLogPort> = Arc::new(PgTransactionLog::new(pool));

        let ledger = Arc::new(ProgressionLedger::new(
            players.clone(),
            inventory.clone(),
            transaction_log.clone(),
        ));
        let battle_pass = Arc::new(BattlePassEngine::new(
            battle_pass_repo.clone(),
            battle_pass_catalog.clone(),
            ledger.clone(),
            transaction_log.clone(),
            config.placement_rewards.clone(),
        ));
        let quests = Arc::new(QuestTracker::new(
            quests_repo.clone(),
            catalog.clone(),
            ledger.clone(),
            battle_pass.clone(),
            transaction_log.clone(),
            clock.clone(),
            random.clone(),
            config.daily_quest_slots,
        ));
        let login = Arc::new(LoginLadder::new(
            login_quests.clone(),
            catalog.clone(),
            ledger.clone(),
            clock.clone(),
        ));
        let roller = Arc::new(RewardRoller::new(
            catalog.clone(),
            inventory.clone(),
            random,
            config.pity.clone(),
            config.chest_coin_min,
            config.chest_coin_max,
        ));
        let chests = Arc::new(ChestResolver::new(
            catalog.clone(),
            inventory.clone(),
            roller,
            ledger.clone(),
        ));
        let player_facade = Arc::new(PlayerFacade::new(
            players.clone(),
            inventory.clone(),
            battle_pass_repo.clone(),
            catalog.clone(),
            battle_pass_catalog.clone(),
            ledger.clone(),
            battle_pass.clone(),
            quests.clone(),
            login.clone(),
            transaction_log.clone(),
            clock,
            config.leaderboard_size,
            config.consumable_xp,
        ));

        Self {
            repositories: Repositories {
                players,
                inventory,
                quests: quests_repo,
                login_quests,
                battle_pass: battle_pass_repo,
                catalog,
                battle_pass_catalog,
                transaction_log,
            },
            use_cases: UseCases {
                ledger,
                battle_pass,
                quests,
                login,
                chests,
                players: player_facade,
            },
        }
    }
}
