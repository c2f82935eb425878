pub mod prelude;

pub mod daily_games;
pub mod game_stats;
pub mod leaderboard_entries;
pub mod played_games;
pub mod users;
