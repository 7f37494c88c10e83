//! Engine configuration.
//!
//! Reward tuning lives in config, not code: the placement table, pity
//! table, and chest coin range can all be changed without a deploy.

use serde::Deserialize;

use arenaforge_domain::Rarity;

/// Coins substituted when a chest rolls a unique cosmetic the player
/// already owns, keyed by rarity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PityTable {
    pub common: i64,
    pub uncommon: i64,
    pub rare: i64,
    pub mythical: i64,
    pub legendary: i64,
}

impl Default for PityTable {
    fn default() -> Self {
        Self {
            common: 30,
            uncommon: 60,
            rare: 125,
            mythical: 300,
            legendary: 800,
        }
    }
}

impl PityTable {
    pub fn coins_for(&self, rarity: Rarity) -> i64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Mythical => self.mythical,
            Rarity::Legendary => self.legendary,
        }
    }
}

/// One row of the post-match placement reward table.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlacementReward {
    pub placement: i32,
    pub xp: i64,
    pub coins: i64,
}

/// Ordered placement -> reward lookup. Placements without a row earn
/// nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacementRewardTable {
    pub rows: Vec<PlacementReward>,
}

impl Default for PlacementRewardTable {
    fn default() -> Self {
        let rows = [
            (1, 300),
            (2, 180),
            (3, 120),
            (4, 90),
            (5, 60),
            (6, 40),
            (7, 20),
            (8, 10),
        ]
        .into_iter()
        .map(|(placement, xp)| PlacementReward {
            placement,
            xp,
            coins: 0,
        })
        .collect();
        Self { rows }
    }
}

impl PlacementRewardTable {
    pub fn reward_for(&self, placement: i32) -> Option<PlacementReward> {
        self.rows.iter().copied().find(|row| row.placement == placement)
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Daily quest slots assigned at account creation.
    pub daily_quest_slots: usize,
    /// Random coin range for currency-placeholder chest rewards.
    pub chest_coin_min: i32,
    pub chest_coin_max: i32,
    pub leaderboard_size: i64,
    /// Battle pass XP granted per consumed XP item. The catalog does
    /// not model per-item XP amounts.
    pub consumable_xp: i64,
    pub pity: PityTable,
    pub placement_rewards: PlacementRewardTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/arenaforge".into(),
            max_connections: 8,
            daily_quest_slots: 3,
            chest_coin_min: 50,
            chest_coin_max: 149,
            leaderboard_size: 100,
            consumable_xp: 300,
            pity: PityTable::default(),
            placement_rewards: PlacementRewardTable::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `config/engine.toml` (optional) with `ARENAFORGE_*`
    /// environment overrides. A `.env` file is honored when present.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/engine").required(false))
            .add_source(config::Environment::with_prefix("ARENAFORGE").separator("__"))
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        // DATABASE_URL wins when set, matching sqlx tooling.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.database_url = url;
        }
        Ok(cfg)
    }
}
