pub mod daily_words;
pub mod leaderboards;
pub mod plays;
pub mod users;

pub use daily_words::DailyWordService;
pub use leaderboards::LeaderboardService;
pub use plays::PlayService;
pub use users::UserService;
