pub mod calendar;
pub mod daily_word;
pub mod evaluation;
pub mod leaderboard;
pub mod session;
pub mod statistics;
pub mod streak;
pub mod word_validation;

// Re-export main components
pub use calendar::*;
pub use daily_word::*;
pub use evaluation::*;
pub use leaderboard::*;
pub use session::*;
pub use statistics::*;
pub use streak::*;
pub use word_validation::*;
