use mindle_types::{GameType, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("{user_id} already played {game_type} on this day")]
    AlreadyPlayed { user_id: UserId, game_type: GameType },

    #[error("invalid played game: {0}")]
    InvalidRecord(String),

    #[error("stats of {user_id} for {game_type} kept changing after {attempts} attempts")]
    StatsConflict {
        user_id: UserId,
        game_type: GameType,
        attempts: u32,
    },

    #[error("vocabulary error: {0}")]
    Vocabulary(String),

    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
