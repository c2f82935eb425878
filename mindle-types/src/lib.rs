pub mod errors;
pub mod game;
pub mod leaderboard;
pub mod stats;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use leaderboard::*;
pub use stats::*;
pub use user::*;

pub type UserId = String;
