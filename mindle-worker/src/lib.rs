pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod services;

use mindle_core::WordValidator;
use mindle_persistence::MindleStore;
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::{Config, ConfigError};
use crate::scheduler::DailyScheduler;
use crate::services::{DailyWordService, LeaderboardService, PlayService, UserService};

/// Every service wired to one store, vocabulary and clock
pub struct Services {
    pub users: UserService,
    pub plays: PlayService,
    pub leaderboards: Arc<LeaderboardService>,
    pub daily_words: Arc<DailyWordService>,
}

impl Services {
    pub fn new(
        store: Arc<dyn MindleStore>,
        vocabulary: Arc<WordValidator>,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let boundary = config.day_boundary()?;
        let leaderboards = Arc::new(LeaderboardService::new(store.clone(), boundary));

        Ok(Self {
            users: UserService::new(
                store.clone(),
                clock.clone(),
                boundary,
                config.streak_policy,
            ),
            plays: PlayService::new(
                store.clone(),
                clock,
                leaderboards.clone(),
                boundary,
                config.streak_policy,
                config.stats_strategy,
                config.max_stats_retries,
            ),
            leaderboards,
            daily_words: Arc::new(DailyWordService::new(store, vocabulary)),
        })
    }

    pub fn scheduler(
        &self,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<DailyScheduler, ConfigError> {
        Ok(DailyScheduler::new(
            self.daily_words.clone(),
            self.leaderboards.clone(),
            clock,
            config.day_boundary()?,
            config.daily_job_hour,
        ))
    }
}
