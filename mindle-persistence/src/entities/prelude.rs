pub use super::daily_games::Entity as DailyGames;
pub use super::game_stats::Entity as GameStats;
pub use super::leaderboard_entries::Entity as LeaderboardEntries;
pub use super::played_games::Entity as PlayedGames;
pub use super::users::Entity as Users;
