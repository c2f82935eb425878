use mindle_core::{DayBoundary, StreakPolicy, consecutive_days};
use mindle_persistence::{MindleStore, PlayedGameQuery};
use mindle_types::{GameType, Identity, User};
use std::sync::Arc;
use tracing::info;

use crate::clock::Clock;
use crate::error::ServiceResult;

pub struct UserService {
    store: Arc<dyn MindleStore>,
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
    streak_policy: StreakPolicy,
}

impl UserService {
    pub fn new(
        store: Arc<dyn MindleStore>,
        clock: Arc<dyn Clock>,
        boundary: DayBoundary,
        streak_policy: StreakPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            boundary,
            streak_policy,
        }
    }

    /// Create the user on first login, otherwise bring the streak up to date.
    /// Either way `last_login` is stamped and every game type has a stats row.
    pub async fn register_login(&self, identity: &Identity) -> ServiceResult<User> {
        let now = self.clock.now_ms();

        let user = match self.store.find_user(&identity.uid).await? {
            None => {
                info!("Creating user {}", identity.uid);
                User::new(identity, now)
            }
            Some(mut user) => {
                let records = self
                    .store
                    .find_played_games(&PlayedGameQuery::for_user(identity.uid.as_str()))
                    .await?;
                let streak = consecutive_days(&records, now, &self.boundary, self.streak_policy);
                if streak != user.consecutive_days_played {
                    info!(
                        "Streak of {} moved from {} to {}",
                        user.id, user.consecutive_days_played, streak
                    );
                }
                user.consecutive_days_played = streak;
                user.last_login = now;
                user
            }
        };

        self.store.save_user(&user).await?;
        for game_type in GameType::ALL {
            self.store.ensure_stats(&user.id, game_type).await?;
        }

        Ok(user)
    }
}
