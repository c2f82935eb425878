use mindle_core::{CalendarDay, DayBoundary, LeaderboardBuilder, UserDirectory};
use mindle_persistence::{MindleStore, PlayedGameQuery};
use mindle_types::{GameType, Leaderboard, LeaderboardKind};
use std::sync::Arc;
use tracing::info;

use crate::error::ServiceResult;

pub struct LeaderboardService {
    store: Arc<dyn MindleStore>,
    boundary: DayBoundary,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn MindleStore>, boundary: DayBoundary) -> Self {
        Self { store, boundary }
    }

    async fn directory(&self) -> ServiceResult<UserDirectory> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(|user| (user.id, user.name)).collect())
    }

    /// Rebuild and store the board of one game type for one calendar day
    pub async fn rebuild_daily(
        &self,
        game_type: GameType,
        day: CalendarDay,
    ) -> ServiceResult<Leaderboard> {
        let window = self.boundary.window(day);
        let records = self
            .store
            .find_played_games(
                &PlayedGameQuery::all()
                    .game_type(game_type)
                    .started_between(window.start, window.end),
            )
            .await?;

        let directory = self.directory().await?;
        let leaderboard = Leaderboard::Daily(LeaderboardBuilder::daily(
            game_type, &records, window, &directory,
        ));

        self.store
            .replace_leaderboard(LeaderboardKind::Daily(game_type), &leaderboard)
            .await?;
        Ok(leaderboard)
    }

    /// Rebuild and store the cross-game board from the stored statistics
    pub async fn rebuild_general(&self) -> ServiceResult<Leaderboard> {
        let stats = self.store.all_stats().await?;
        let directory = self.directory().await?;
        let leaderboard = Leaderboard::General(LeaderboardBuilder::general(&stats, &directory));

        self.store
            .replace_leaderboard(LeaderboardKind::General, &leaderboard)
            .await?;
        Ok(leaderboard)
    }

    /// Every daily board of `day` plus the general board
    pub async fn rebuild_all(&self, day: CalendarDay) -> ServiceResult<()> {
        for game_type in GameType::ALL {
            self.rebuild_daily(game_type, day).await?;
        }
        let general = self.rebuild_general().await?;
        info!("Rebuilt all leaderboards, {} users ranked overall", general.len());
        Ok(())
    }

    pub async fn leaderboard(&self, kind: LeaderboardKind) -> ServiceResult<Leaderboard> {
        Ok(self.store.find_leaderboard(kind).await?)
    }
}
