//! Player facade: the entry point for externally triggered events.
//!
//! Account lifecycle and post-match orchestration live here; commerce
//! operations are in `commerce`, read-side views in `views`.

pub mod commerce;
pub mod error;
pub mod views;

use std::sync::Arc;

use arenaforge_domain::{Player, PlayerId, PlayerMatchResult, UserType};

use crate::infrastructure::ports::{
    BattlePassCatalogPort, BattlePassRepo, CatalogPort, ClockPort, InventoryRepo, PlayerRepo,
    TransactionLogPort,
};
use crate::use_cases::battle_pass::BattlePassEngine;
use crate::use_cases::ledger::ProgressionLedger;
use crate::use_cases::quests::{LoginLadder, QuestTracker};

pub use error::PlayerError;

pub struct PlayerFacade {
    player_repo: Arc<dyn PlayerRepo>,
    inventory_repo: Arc<dyn InventoryRepo>,
    bp_repo: Arc<dyn BattlePassRepo>,
    catalog: Arc<dyn CatalogPort>,
    bp_catalog: Arc<dyn BattlePassCatalogPort>,
    ledger: Arc<ProgressionLedger>,
    battle_pass: Arc<BattlePassEngine>,
    quests: Arc<QuestTracker>,
    login: Arc<LoginLadder>,
    log: Arc<dyn TransactionLogPort>,
    clock: Arc<dyn ClockPort>,
    leaderboard_size: i64,
    consumable_xp: i64,
}

impl PlayerFacade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        inventory_repo: Arc<dyn InventoryRepo>,
        bp_repo: Arc<dyn BattlePassRepo>,
        catalog: Arc<dyn CatalogPort>,
        bp_catalog: Arc<dyn BattlePassCatalogPort>,
        ledger: Arc<ProgressionLedger>,
        battle_pass: Arc<BattlePassEngine>,
        quests: Arc<QuestTracker>,
        login: Arc<LoginLadder>,
        log: Arc<dyn TransactionLogPort>,
        clock: Arc<dyn ClockPort>,
        leaderboard_size: i64,
        consumable_xp: i64,
    ) -> Self {
        Self {
            player_repo,
            inventory_repo,
            bp_repo,
            catalog,
            bp_catalog,
            ledger,
            battle_pass,
            quests,
            login,
            log,
            clock,
            leaderboard_size,
            consumable_xp,
        }
    }

    /// Create a fresh account with its full starting state: player
    /// row, initial quest slots, every achievement, the login ladder
    /// and a zeroed battle pass row for the active season.
    pub async fn create_player(
        &self,
        id: PlayerId,
        username: &str,
    ) -> Result<Player, PlayerError> {
        if self.player_repo.get(&id).await?.is_some() {
            return Err(PlayerError::PlayerAlreadyExists);
        }

        let player = Player::new(id.clone(), username, self.clock.now());
        self.player_repo.insert(&player).await?;

        self.quests.assign_initial(&id).await?;
        self.login.reset(&id).await?;

        if let Some(season) = self.bp_catalog.active_battle_pass().await? {
            self.bp_repo.insert(&id, season.id).await?;
        }

        tracing::info!(player = %id, username, "Player created");
        Ok(player)
    }

    /// Returning players get a username refresh; unknown players get
    /// the full creation path.
    pub async fn upsert_player(
        &self,
        id: PlayerId,
        username: &str,
    ) -> Result<Player, PlayerError> {
        match self.player_repo.get(&id).await? {
            Some(mut player) => {
                if player.username != username {
                    self.player_repo.update_username(&id, username).await?;
                    player.username = username.to_string();
                }
                Ok(player)
            }
            None => self.create_player(id, username).await,
        }
    }

    /// Fold one finished match into the player's progression: quest
    /// progress first, then placement XP and coins, then the MMR move.
    pub async fn apply_match_result(
        &self,
        result: &PlayerMatchResult,
    ) -> Result<(), PlayerError> {
        self.quests.add_match_progress(result).await?;
        self.battle_pass
            .post_match_rewards(&result.player, result.placement)
            .await?;

        if result.mmr_delta != 0 {
            self.player_repo
                .add_mmr(&result.player, result.mmr_delta)
                .await?;
        }

        tracing::info!(
            player = %result.player,
            placement = result.placement,
            round_wins = result.round_wins,
            mmr_delta = result.mmr_delta,
            "Match result applied"
        );
        Ok(())
    }

    /// Direct MMR adjustment, used by moderation tooling.
    pub async fn modify_mmr(&self, player: &PlayerId, delta: i32) -> Result<(), PlayerError> {
        if delta == 0 {
            return Ok(());
        }
        self.player_repo.add_mmr(player, delta).await?;
        tracing::info!(player = %player, delta, "MMR adjusted");
        Ok(())
    }

    pub async fn set_user_type(
        &self,
        player: &PlayerId,
        user_type: UserType,
    ) -> Result<(), PlayerError> {
        self.player_repo.set_user_type(player, user_type).await?;
        Ok(())
    }

    pub async fn update_username(
        &self,
        player: &PlayerId,
        username: &str,
    ) -> Result<(), PlayerError> {
        self.player_repo.update_username(player, username).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::PlacementRewardTable;
    use crate::infrastructure::ports::{
        MockBattlePassCatalogPort, MockBattlePassRepo, MockCatalogPort, MockClockPort,
        MockInventoryRepo, MockLoginQuestRepo, MockPlayerRepo, MockQuestRepo, MockRandomPort,
        MockTransactionLogPort,
    };
    use chrono::{DateTime, Utc};

    /// Every mock the facade graph needs, wired the way `App` wires
    /// the real adapters.
    pub(crate) struct FacadeFixture {
        pub player_repo: MockPlayerRepo,
        pub inventory_repo: MockInventoryRepo,
        pub quest_repo: MockQuestRepo,
        pub login_repo: MockLoginQuestRepo,
        pub bp_repo: MockBattlePassRepo,
        pub catalog: MockCatalogPort,
        pub bp_catalog: MockBattlePassCatalogPort,
        pub log: MockTransactionLogPort,
        pub clock: MockClockPort,
        pub random: MockRandomPort,
        pub now: DateTime<Utc>,
    }

    impl FacadeFixture {
        pub fn new() -> Self {
            let now = Utc::now();
            let mut clock = MockClockPort::new();
            clock.expect_now().returning(move || now);
            let mut random = MockRandomPort::new();
            random.expect_gen_range().returning(|min, _| min);
            Self {
                player_repo: MockPlayerRepo::new(),
                inventory_repo: MockInventoryRepo::new(),
                quest_repo: MockQuestRepo::new(),
                login_repo: MockLoginQuestRepo::new(),
                bp_repo: MockBattlePassRepo::new(),
                catalog: MockCatalogPort::new(),
                bp_catalog: MockBattlePassCatalogPort::new(),
                log: MockTransactionLogPort::new(),
                clock,
                random,
                now,
            }
        }

        pub fn facade(self) -> PlayerFacade {
            let player_repo = Arc::new(self.player_repo);
            let inventory_repo = Arc::new(self.inventory_repo);
            let bp_repo = Arc::new(self.bp_repo);
            let catalog = Arc::new(self.catalog);
            let bp_catalog = Arc::new(self.bp_catalog);
            let log = Arc::new(self.log);
            let clock = Arc::new(self.clock);
            let random = Arc::new(self.random);

            let ledger = Arc::new(ProgressionLedger::new(
                player_repo.clone(),
                inventory_repo.clone(),
                log.clone(),
            ));
            let battle_pass = Arc::new(BattlePassEngine::new(
                bp_repo.clone(),
                bp_catalog.clone(),
                ledger.clone(),
                log.clone(),
                PlacementRewardTable::default(),
            ));
            let quests = Arc::new(QuestTracker::new(
                Arc::new(self.quest_repo),
                catalog.clone(),
                ledger.clone(),
                battle_pass.clone(),
                log.clone(),
                clock.clone(),
                random,
                3,
            ));
            let login = Arc::new(LoginLadder::new(
                Arc::new(self.login_repo),
                catalog.clone(),
                ledger.clone(),
                clock.clone(),
            ));

            PlayerFacade::new(
                player_repo,
                inventory_repo,
                bp_repo,
                catalog,
                bp_catalog,
                ledger,
                battle_pass,
                quests,
                login,
                log,
                clock,
                100,
                300,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FacadeFixture;
    use super::*;
    use arenaforge_domain::{BattlePass, BattlePassId, LoginQuest, Quest, QuestCadence, QuestId};
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    fn daily_quest(id: i64, stat: &str) -> Quest {
        Quest {
            id: QuestId::new(id),
            name: format!("quest-{id}"),
            stat: stat.to_string(),
            required_amount: 5,
            coin_reward: 100,
            xp_reward: 0,
            is_weekly: false,
            is_achievement: false,
        }
    }

    fn season() -> BattlePass {
        BattlePass {
            id: BattlePassId::new(1),
            max_level: 30,
            start: Utc::now() - Duration::days(1),
            end: Utc::now() + Duration::days(30),
        }
    }

    #[tokio::test]
    async fn creation_sets_up_the_full_starting_state() {
        let mut fixture = FacadeFixture::new();
        fixture.player_repo.expect_get().returning(|_| Ok(None));
        fixture
            .player_repo
            .expect_insert()
            .withf(|player| player.id.as_str() == "p1" && player.coins == 0)
            .once()
            .returning(|_| Ok(()));

        // Quest slots: three dailies plus one achievement.
        fixture
            .quest_repo
            .expect_list_by_cadence()
            .with(eq(PlayerId::new("p1")), eq(QuestCadence::Daily))
            .returning(|_, _| Ok(vec![]));
        fixture.catalog.expect_all_daily_quests().returning(|| {
            Ok(vec![
                daily_quest(1, "games_played"),
                daily_quest(2, "rounds_won"),
                daily_quest(3, "first_place"),
            ])
        });
        fixture.catalog.expect_all_achievements().returning(|| {
            let mut achievement = daily_quest(50, "games_played");
            achievement.is_achievement = true;
            Ok(vec![achievement])
        });
        fixture
            .quest_repo
            .expect_insert_assignment()
            .times(4)
            .returning(|_, _, _| Ok(()));

        // Login ladder.
        fixture.catalog.expect_login_quests().returning(|| {
            Ok(vec![
                LoginQuest {
                    day: 1,
                    coin_reward: 50,
                    cosmetic_reward: None,
                },
                LoginQuest {
                    day: 2,
                    coin_reward: 75,
                    cosmetic_reward: None,
                },
            ])
        });
        fixture
            .login_repo
            .expect_replace_ladder()
            .withf(|_, days| days == [1, 2])
            .once()
            .returning(|_, _| Ok(()));

        // Battle pass season row.
        fixture
            .bp_catalog
            .expect_active_battle_pass()
            .returning(|| Ok(Some(season())));
        fixture
            .bp_repo
            .expect_insert()
            .with(eq(PlayerId::new("p1")), eq(BattlePassId::new(1)))
            .once()
            .returning(|_, _| Ok(()));

        let facade = fixture.facade();
        let player = facade
            .create_player(PlayerId::new("p1"), "newcomer")
            .await
            .unwrap();
        assert_eq!(player.username, "newcomer");
        assert_eq!(player.mmr, arenaforge_domain::DEFAULT_MMR);
    }

    #[tokio::test]
    async fn duplicate_creation_is_rejected() {
        let mut fixture = FacadeFixture::new();
        let now = fixture.now;
        fixture
            .player_repo
            .expect_get()
            .returning(move |id| Ok(Some(Player::new(id.clone(), "existing", now))));

        let facade = fixture.facade();
        let result = facade.create_player(PlayerId::new("p1"), "newcomer").await;
        assert!(matches!(result, Err(PlayerError::PlayerAlreadyExists)));
    }

    #[tokio::test]
    async fn upsert_refreshes_a_changed_username() {
        let mut fixture = FacadeFixture::new();
        let now = fixture.now;
        fixture
            .player_repo
            .expect_get()
            .returning(move |id| Ok(Some(Player::new(id.clone(), "old-name", now))));
        fixture
            .player_repo
            .expect_update_username()
            .with(eq(PlayerId::new("p1")), eq("new-name"))
            .once()
            .returning(|_, _| Ok(()));

        let facade = fixture.facade();
        let player = facade
            .upsert_player(PlayerId::new("p1"), "new-name")
            .await
            .unwrap();
        assert_eq!(player.username, "new-name");
    }

    #[tokio::test]
    async fn match_result_flows_through_quests_rewards_and_mmr() {
        let mut fixture = FacadeFixture::new();
        let now = fixture.now;

        // Quest progress for one assigned quest.
        fixture.quest_repo.expect_list_assigned().returning(move |_| {
            Ok(vec![arenaforge_domain::AssignedQuest {
                assignment: arenaforge_domain::QuestAssignment {
                    quest_id: QuestId::new(2),
                    slot: Some(1),
                    progress: 0,
                    claimed: false,
                    created_at: now,
                },
                quest: daily_quest(2, "rounds_won"),
            }])
        });
        fixture
            .quest_repo
            .expect_increment_progress()
            .with(eq(PlayerId::new("p1")), eq(QuestId::new(2)), eq(3))
            .once()
            .returning(|_, _, _| Ok(()));

        // Placement rewards: 3rd place pays 120 XP, no level change.
        fixture
            .log
            .expect_record()
            .withf(|_, kind, _| kind == "game_xp")
            .once()
            .returning(|_, _, _| Ok(()));
        fixture
            .bp_catalog
            .expect_active_battle_pass()
            .returning(|| Ok(Some(season())));
        fixture
            .bp_repo
            .expect_add_xp()
            .withf(|id, _, xp| id.as_str() == "p1" && *xp == 120)
            .once()
            .returning(|_, _, _| {
                Ok(arenaforge_domain::BattlePassProgress {
                    battle_pass_id: BattlePassId::new(1),
                    total_xp: 120,
                    level: 0,
                    unlocked: false,
                })
            });
        fixture
            .bp_catalog
            .expect_calculate_level()
            .returning(|_, _| Ok(0));

        fixture
            .player_repo
            .expect_add_mmr()
            .with(eq(PlayerId::new("p1")), eq(-25))
            .once()
            .returning(|_, _| Ok(()));

        let result = PlayerMatchResult {
            player: PlayerId::new("p1"),
            placement: 3,
            round_wins: 3,
            heroes: vec![],
            mmr_delta: -25,
        };
        let facade = fixture.facade();
        facade.apply_match_result(&result).await.unwrap();
    }

    #[tokio::test]
    async fn zero_mmr_delta_writes_nothing() {
        let mut fixture = FacadeFixture::new();
        // No add_mmr expectation: a write would panic.
        fixture.player_repo.expect_get().never();

        let facade = fixture.facade();
        facade.modify_mmr(&PlayerId::new("p1"), 0).await.unwrap();
    }
}
