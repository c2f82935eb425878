use mindle_core::{DayBoundary, StatsAggregator, StreakPolicy, WordValidator, consecutive_days};
use mindle_persistence::{MindleStore, PlayedGameQuery, VersionedStats};
use mindle_types::{GameStats, GameType, PlayedGame, User, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::StatsStrategy;
use crate::error::{ServiceError, ServiceResult};
use crate::services::LeaderboardService;

/// What storing one play changed
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    pub user: User,
    pub stats: GameStats,
}

pub struct PlayService {
    store: Arc<dyn MindleStore>,
    clock: Arc<dyn Clock>,
    leaderboards: Arc<LeaderboardService>,
    boundary: DayBoundary,
    streak_policy: StreakPolicy,
    strategy: StatsStrategy,
    max_stats_retries: u32,
    // Serializes recordings of one user within this process
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl PlayService {
    pub fn new(
        store: Arc<dyn MindleStore>,
        clock: Arc<dyn Clock>,
        leaderboards: Arc<LeaderboardService>,
        boundary: DayBoundary,
        streak_policy: StreakPolicy,
        strategy: StatsStrategy,
        max_stats_retries: u32,
    ) -> Self {
        Self {
            store,
            clock,
            leaderboards,
            boundary,
            streak_policy,
            strategy,
            max_stats_retries,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Store a finished game and bring everything derived from it up to date.
    ///
    /// Submitting a record that is already stored is not an error: the
    /// updates that depend on it are completed again, so a recording that
    /// failed halfway can simply be retried.
    pub async fn record_played_game(&self, record: PlayedGame) -> ServiceResult<PlayOutcome> {
        Self::validate(&record)?;

        let lock = self.user_lock(&record.user_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.record_locked(&record).await
        };
        self.release_user_lock(&record.user_id, lock).await;
        result
    }

    /// Rebuild the stats, totals and streak of a user from the stored log
    pub async fn reconcile(&self, user_id: &str) -> ServiceResult<User> {
        let lock = self.user_lock(user_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.reconcile_locked(user_id).await
        };
        self.release_user_lock(user_id, lock).await;
        result
    }

    async fn record_locked(&self, record: &PlayedGame) -> ServiceResult<PlayOutcome> {
        let mut user = self.find_user(&record.user_id).await?;

        let window = self.boundary.window(self.boundary.day_of(record.start_time));
        let same_day = self
            .store
            .find_played_games(
                &PlayedGameQuery::for_user(record.user_id.as_str())
                    .game_type(record.game_type)
                    .started_between(window.start, window.end),
            )
            .await?;

        if same_day.iter().any(|stored| stored == record) {
            info!(
                "{} game of {} is already stored, completing its updates",
                record.game_type, record.user_id
            );
        } else if !same_day.is_empty() {
            warn!("{} tried to record a second {} game", record.user_id, record.game_type);
            return Err(ServiceError::AlreadyPlayed {
                user_id: record.user_id.clone(),
                game_type: record.game_type,
            });
        } else {
            self.store.insert_played_game(record).await?;
        }

        let stats = self
            .update_stats(&record.user_id, record.game_type, Some(record))
            .await?;
        self.refresh_user(&mut user).await?;

        let today = self.boundary.day_of(self.clock.now_ms());
        self.leaderboards.rebuild_daily(record.game_type, today).await?;
        self.leaderboards.rebuild_general().await?;

        info!(
            "Recorded {} game of {} ({} guesses, won: {})",
            record.game_type, record.user_id, record.number_of_guesses, record.won_game
        );
        Ok(PlayOutcome { user, stats })
    }

    async fn reconcile_locked(&self, user_id: &str) -> ServiceResult<User> {
        let mut user = self.find_user(user_id).await?;

        for game_type in GameType::ALL {
            self.update_stats(user_id, game_type, None).await?;
        }
        self.refresh_user(&mut user).await?;

        let today = self.boundary.day_of(self.clock.now_ms());
        for game_type in GameType::ALL {
            self.leaderboards.rebuild_daily(game_type, today).await?;
        }
        self.leaderboards.rebuild_general().await?;

        info!(
            "Reconciled {} from {} stored games",
            user_id, user.total_games_played
        );
        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> ServiceResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::UnknownUser(user_id.to_string()))
    }

    /// Recount totals and streak from the log and store the user
    async fn refresh_user(&self, user: &mut User) -> ServiceResult<()> {
        let history = self
            .store
            .find_played_games(&PlayedGameQuery::for_user(user.id.as_str()))
            .await?;
        user.total_games_played = history.len() as u32;
        user.consecutive_days_played = consecutive_days(
            &history,
            self.clock.now_ms(),
            &self.boundary,
            self.streak_policy,
        );
        self.store.save_user(user).await?;
        Ok(())
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks.entry(user_id.to_string()).or_default().clone()
    }

    async fn release_user_lock(&self, user_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().await;
        // Held only by the map and this caller
        if Arc::strong_count(&lock) == 2 {
            locks.remove(user_id);
        }
    }

    /// Optimistic read-modify-write of the (user, game type) stats row.
    ///
    /// `record` is folded into the stored stats when they count exactly the
    /// other records of the log; otherwise the stats are recomputed from
    /// the log, which also repairs rows left behind by a failed update.
    async fn update_stats(
        &self,
        user_id: &str,
        game_type: GameType,
        record: Option<&PlayedGame>,
    ) -> ServiceResult<GameStats> {
        for attempt in 1..=self.max_stats_retries {
            let current = self
                .store
                .load_stats(user_id, game_type)
                .await?
                .unwrap_or(VersionedStats {
                    stats: GameStats::NO_DATA,
                    version: 0,
                });
            let records = self
                .store
                .find_played_games(&PlayedGameQuery::for_user(user_id).game_type(game_type))
                .await?;

            let fold_onto = match (self.strategy, record) {
                (StatsStrategy::Incremental, Some(record)) => {
                    if current.stats.games_counted() + 1 == records.len() as i64 {
                        Some(record)
                    } else {
                        warn!(
                            "Stats of {} for {} count {} games but {} are stored, recomputing",
                            user_id,
                            game_type,
                            current.stats.games_counted(),
                            records.len()
                        );
                        None
                    }
                }
                _ => None,
            };
            let next = match fold_onto {
                Some(record) => StatsAggregator::fold(&current.stats, record),
                None => StatsAggregator::aggregate(&records),
            };

            if self
                .store
                .compare_and_swap_stats(user_id, game_type, current.version, &next)
                .await?
            {
                return Ok(next);
            }

            debug!(
                "Stats of {} for {} changed underneath, attempt {} of {}",
                user_id, game_type, attempt, self.max_stats_retries
            );
            tokio::task::yield_now().await;
        }

        Err(ServiceError::StatsConflict {
            user_id: user_id.to_string(),
            game_type,
            attempts: self.max_stats_retries,
        })
    }

    fn validate(record: &PlayedGame) -> ServiceResult<()> {
        let invalid = |reason: String| Err(ServiceError::InvalidRecord(reason));

        if record.user_id.trim().is_empty() {
            return invalid("missing user id".to_string());
        }
        if record.end_time < record.start_time {
            return invalid(format!(
                "ended at {} before it started at {}",
                record.end_time, record.start_time
            ));
        }
        if record.guesses.len() != record.number_of_guesses as usize {
            return invalid(format!(
                "{} guesses listed but numberOfGuesses is {}",
                record.guesses.len(),
                record.number_of_guesses
            ));
        }
        if record.number_of_guesses as usize > record.game_type.max_guesses() {
            return invalid(format!(
                "{} guesses exceed the {} limit of {}",
                record.number_of_guesses,
                record.game_type,
                record.game_type.max_guesses()
            ));
        }

        let final_length = record.game_type.word_lengths().last().copied().unwrap_or(0);
        if record.word.chars().count() != final_length || !WordValidator::is_alphabetic(&record.word)
        {
            return invalid(format!(
                "{:?} is not a {}-letter word",
                record.word, final_length
            ));
        }

        if record.won_game {
            let solved = record
                .guesses
                .last()
                .is_some_and(|last| last.eq_ignore_ascii_case(&record.word));
            if !solved {
                return invalid("won game does not end on the target word".to_string());
            }
        }

        Ok(())
    }
}
