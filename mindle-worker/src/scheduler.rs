use mindle_core::DayBoundary;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::services::{DailyWordService, LeaderboardService};

/// Runs the daily job: new words for every game type, fresh leaderboards
pub struct DailyScheduler {
    daily_words: Arc<DailyWordService>,
    leaderboards: Arc<LeaderboardService>,
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
    hour: u32,
}

impl DailyScheduler {
    pub fn new(
        daily_words: Arc<DailyWordService>,
        leaderboards: Arc<LeaderboardService>,
        clock: Arc<dyn Clock>,
        boundary: DayBoundary,
        hour: u32,
    ) -> Self {
        Self {
            daily_words,
            leaderboards,
            clock,
            boundary,
            hour,
        }
    }

    pub async fn run_once(&self) -> ServiceResult<()> {
        self.daily_words.choose_daily_words().await?;

        let today = self.boundary.day_of(self.clock.now_ms());
        self.leaderboards.rebuild_all(today).await?;
        Ok(())
    }

    /// Time left until the next run
    pub fn until_next_run(&self) -> Duration {
        let now = self.clock.now_ms();
        let next = self.boundary.next_occurrence_of_hour(now, self.hour);
        Duration::from_millis((next - now).max(0) as u64)
    }

    /// Loop forever; failures are logged and retried at the next run
    pub async fn run(&self) {
        loop {
            let wait = self.until_next_run();
            info!("Next daily job in {} minutes", wait.as_secs() / 60);
            tokio::time::sleep(wait).await;

            match self.run_once().await {
                Ok(()) => info!("Daily job finished"),
                Err(e) => error!("Daily job failed: {}", e),
            }
        }
    }
}
