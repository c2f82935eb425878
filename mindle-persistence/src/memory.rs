use anyhow::{Result, bail};
use async_trait::async_trait;
use mindle_types::{DailyGame, GameStats, GameType, Leaderboard, LeaderboardKind, PlayedGame, User, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{MindleStore, PlayedGameQuery, VersionedStats};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    played_games: Vec<PlayedGame>,
    stats: HashMap<(UserId, GameType), VersionedStats>,
    daily_games: HashMap<GameType, DailyGame>,
    leaderboards: HashMap<LeaderboardKind, Leaderboard>,
}

/// Store kept entirely in memory, for tests and local runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MindleStore for InMemoryStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let mut state = self.state.write().await;
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn insert_played_game(&self, record: &PlayedGame) -> Result<()> {
        let mut state = self.state.write().await;
        state.played_games.push(record.clone());
        debug!("Stored {} game of {}", record.game_type, record.user_id);
        Ok(())
    }

    async fn find_played_games(&self, query: &PlayedGameQuery) -> Result<Vec<PlayedGame>> {
        let state = self.state.read().await;
        let mut records: Vec<PlayedGame> = state
            .played_games
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        records.sort_by_key(|record| record.start_time);
        Ok(records)
    }

    async fn ensure_stats(&self, user_id: &str, game_type: GameType) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .stats
            .entry((user_id.to_string(), game_type))
            .or_insert(VersionedStats {
                stats: GameStats::NO_DATA,
                version: 0,
            });
        Ok(())
    }

    async fn load_stats(&self, user_id: &str, game_type: GameType) -> Result<Option<VersionedStats>> {
        let state = self.state.read().await;
        Ok(state.stats.get(&(user_id.to_string(), game_type)).cloned())
    }

    async fn compare_and_swap_stats(
        &self,
        user_id: &str,
        game_type: GameType,
        expected_version: i64,
        stats: &GameStats,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        let key = (user_id.to_string(), game_type);

        match state.stats.get_mut(&key) {
            Some(current) if current.version == expected_version => {
                current.stats = stats.clone();
                current.version += 1;
                Ok(true)
            }
            Some(_) => Ok(false),
            None if expected_version == 0 => {
                state.stats.insert(
                    key,
                    VersionedStats {
                        stats: stats.clone(),
                        version: 1,
                    },
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn all_stats(&self) -> Result<HashMap<UserId, Vec<GameStats>>> {
        let state = self.state.read().await;
        let mut grouped: HashMap<UserId, Vec<GameStats>> = HashMap::new();
        for ((user_id, _), versioned) in &state.stats {
            grouped
                .entry(user_id.clone())
                .or_default()
                .push(versioned.stats.clone());
        }
        Ok(grouped)
    }

    async fn find_daily_game(&self, game_type: GameType) -> Result<Option<DailyGame>> {
        Ok(self.state.read().await.daily_games.get(&game_type).cloned())
    }

    async fn save_daily_game(&self, daily_game: &DailyGame) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .daily_games
            .insert(daily_game.game_type, daily_game.clone());
        Ok(())
    }

    async fn replace_leaderboard(&self, kind: LeaderboardKind, leaderboard: &Leaderboard) -> Result<()> {
        if !leaderboard.matches(kind) {
            bail!("Leaderboard does not match the {} board", kind);
        }
        let mut state = self.state.write().await;
        state.leaderboards.insert(kind, leaderboard.clone());
        Ok(())
    }

    async fn find_leaderboard(&self, kind: LeaderboardKind) -> Result<Leaderboard> {
        let state = self.state.read().await;
        Ok(match state.leaderboards.get(&kind) {
            Some(leaderboard) => leaderboard.clone(),
            None => Leaderboard::empty(kind),
        })
    }
}
