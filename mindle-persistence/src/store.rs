use anyhow::Result;
use async_trait::async_trait;
use mindle_types::{DailyGame, GameStats, GameType, Leaderboard, LeaderboardKind, PlayedGame, User, UserId};
use std::collections::HashMap;

/// Filter for played game lookups; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayedGameQuery {
    pub user_id: Option<UserId>,
    pub game_type: Option<GameType>,
    /// Inclusive range of start times in Unix milliseconds
    pub started_between: Option<(i64, i64)>,
}

impl PlayedGameQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = Some(game_type);
        self
    }

    pub fn started_between(mut self, start: i64, end: i64) -> Self {
        self.started_between = Some((start, end));
        self
    }

    pub fn matches(&self, record: &PlayedGame) -> bool {
        self.user_id.as_ref().is_none_or(|id| *id == record.user_id)
            && self.game_type.is_none_or(|gt| gt == record.game_type)
            && self
                .started_between
                .is_none_or(|(start, end)| (start..=end).contains(&record.start_time))
    }
}

/// Stored statistics together with the version a compare-and-swap must present
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedStats {
    pub stats: GameStats,
    pub version: i64,
}

/// Everything the services persist. Implementations must make
/// `compare_and_swap_stats` atomic and `replace_leaderboard` all-or-nothing.
#[async_trait]
pub trait MindleStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>>;
    /// Insert or overwrite a user
    async fn save_user(&self, user: &User) -> Result<()>;
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn insert_played_game(&self, record: &PlayedGame) -> Result<()>;
    /// Matching records ordered by start time
    async fn find_played_games(&self, query: &PlayedGameQuery) -> Result<Vec<PlayedGame>>;

    /// Create the no-data stats row at version 0 unless one exists
    async fn ensure_stats(&self, user_id: &str, game_type: GameType) -> Result<()>;
    async fn load_stats(&self, user_id: &str, game_type: GameType) -> Result<Option<VersionedStats>>;
    /// Write `stats` only if the stored version still equals `expected_version`.
    /// Returns false when another writer got there first.
    async fn compare_and_swap_stats(
        &self,
        user_id: &str,
        game_type: GameType,
        expected_version: i64,
        stats: &GameStats,
    ) -> Result<bool>;
    /// Every stored stats row, grouped by user
    async fn all_stats(&self) -> Result<HashMap<UserId, Vec<GameStats>>>;

    async fn find_daily_game(&self, game_type: GameType) -> Result<Option<DailyGame>>;
    async fn save_daily_game(&self, daily_game: &DailyGame) -> Result<()>;

    /// Swap the stored board for `leaderboard` in one step
    async fn replace_leaderboard(&self, kind: LeaderboardKind, leaderboard: &Leaderboard) -> Result<()>;
    /// The stored board, empty when none was written yet
    async fn find_leaderboard(&self, kind: LeaderboardKind) -> Result<Leaderboard>;
}
