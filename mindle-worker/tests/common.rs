#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use mindle_core::WordValidator;
use mindle_persistence::{InMemoryStore, MindleStore, PlayedGameQuery, VersionedStats};
use mindle_types::{
    DailyGame, GameStats, GameType, Identity, Leaderboard, LeaderboardKind, PlayedGame, User,
    UserId,
};
use mindle_worker::Services;
use mindle_worker::clock::FixedClock;
use mindle_worker::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

// 2024-03-10 12:00 UTC
pub const NOON: i64 = 1_710_072_000_000;

pub struct TestContext {
    pub store: Arc<dyn MindleStore>,
    pub clock: Arc<FixedClock>,
    pub config: Config,
    pub services: Services,
}

/// Config with days starting at midnight UTC, overridable per key
pub fn create_test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("DAY_OFFSET_HOURS".to_string(), "0".to_string());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Creates a test WordValidator with enough words for every game type
pub fn create_test_validator() -> Arc<WordValidator> {
    let word_list = "boat\ncoat\nmoat\ncrane\ntoast\nhouse\nplane\nplanet\nplants\nstream\nfreedom\nkingdom\nmonster";
    Arc::new(WordValidator::from_word_list(word_list))
}

pub fn setup() -> TestContext {
    setup_with(Arc::new(InMemoryStore::new()), create_test_config(&[]))
}

pub fn setup_with(store: Arc<dyn MindleStore>, config: Config) -> TestContext {
    let clock = Arc::new(FixedClock::new(NOON));
    let services =
        Services::new(store.clone(), create_test_validator(), &config, clock.clone()).unwrap();
    TestContext {
        store,
        clock,
        config,
        services,
    }
}

pub fn create_identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: format!("{}@example.com", uid),
        name: format!("Player {}", uid),
    }
}

/// A won game of `user` started `days_ago` days before [`NOON`]
pub fn create_won_game(
    user: &str,
    game_type: GameType,
    days_ago: i64,
    guesses: u32,
    seconds: i64,
) -> PlayedGame {
    let word = match game_type {
        GameType::Stepdle => "freedom",
        GameType::Wordle | GameType::Ordle => "toast",
    };
    let mut all_guesses = vec!["crane".to_string(); guesses.saturating_sub(1) as usize];
    all_guesses.push(word.to_string());

    let start_time = NOON - days_ago * DAY_MS;
    PlayedGame {
        user_id: user.to_string(),
        game_type,
        start_time,
        end_time: start_time + seconds * 1000,
        guesses: all_guesses,
        number_of_guesses: guesses,
        word: word.to_string(),
        won_game: true,
    }
}

/// A lost Wordle game of `user` started `days_ago` days before [`NOON`]
pub fn create_lost_game(user: &str, days_ago: i64, seconds: i64) -> PlayedGame {
    let start_time = NOON - days_ago * DAY_MS;
    PlayedGame {
        user_id: user.to_string(),
        game_type: GameType::Wordle,
        start_time,
        end_time: start_time + seconds * 1000,
        guesses: vec!["crane".to_string(); 6],
        number_of_guesses: 6,
        word: "toast".to_string(),
        won_game: false,
    }
}

/// Wraps a store and sneaks a competing stats write in before the first
/// `conflicts` compare-and-swap calls, so they see a stale version
pub struct ConflictingStore {
    inner: InMemoryStore,
    conflicts: AtomicU32,
}

impl ConflictingStore {
    pub fn new(conflicts: u32) -> Self {
        Self {
            inner: InMemoryStore::new(),
            conflicts: AtomicU32::new(conflicts),
        }
    }
}

#[async_trait]
impl MindleStore for ConflictingStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        self.inner.find_user(user_id).await
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.inner.save_user(user).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.inner.list_users().await
    }

    async fn insert_played_game(&self, record: &PlayedGame) -> Result<()> {
        self.inner.insert_played_game(record).await
    }

    async fn find_played_games(&self, query: &PlayedGameQuery) -> Result<Vec<PlayedGame>> {
        self.inner.find_played_games(query).await
    }

    async fn ensure_stats(&self, user_id: &str, game_type: GameType) -> Result<()> {
        self.inner.ensure_stats(user_id, game_type).await
    }

    async fn load_stats(&self, user_id: &str, game_type: GameType) -> Result<Option<VersionedStats>> {
        self.inner.load_stats(user_id, game_type).await
    }

    async fn compare_and_swap_stats(
        &self,
        user_id: &str,
        game_type: GameType,
        expected_version: i64,
        stats: &GameStats,
    ) -> Result<bool> {
        let remaining = self.conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.conflicts.store(remaining - 1, Ordering::SeqCst);
            // Rewrite the row unchanged, which only bumps its version
            if let Some(current) = self.inner.load_stats(user_id, game_type).await? {
                self.inner
                    .compare_and_swap_stats(user_id, game_type, current.version, &current.stats)
                    .await?;
            }
        }
        self.inner
            .compare_and_swap_stats(user_id, game_type, expected_version, stats)
            .await
    }

    async fn all_stats(&self) -> Result<HashMap<UserId, Vec<GameStats>>> {
        self.inner.all_stats().await
    }

    async fn find_daily_game(&self, game_type: GameType) -> Result<Option<DailyGame>> {
        self.inner.find_daily_game(game_type).await
    }

    async fn save_daily_game(&self, daily_game: &DailyGame) -> Result<()> {
        self.inner.save_daily_game(daily_game).await
    }

    async fn replace_leaderboard(&self, kind: LeaderboardKind, leaderboard: &Leaderboard) -> Result<()> {
        self.inner.replace_leaderboard(kind, leaderboard).await
    }

    async fn find_leaderboard(&self, kind: LeaderboardKind) -> Result<Leaderboard> {
        self.inner.find_leaderboard(kind).await
    }
}
