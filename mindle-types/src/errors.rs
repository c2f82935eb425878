use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EvaluationError {
    #[error("guess has {guess_len} letters but the target has {target_len}")]
    InvalidInput { target_len: u32, guess_len: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("not a word in the vocabulary: {word}")]
    InvalidWord { word: String },
    #[error("expected a {expected}-letter word, got {actual} letters")]
    WrongLength { expected: u32, actual: u32 },
    #[error("game is already completed")]
    GameAlreadyCompleted,
    #[error("unsupported word length {length}")]
    UnsupportedWordLength { length: u32 },
    #[error("daily words missing for {game_type}")]
    MissingDailyWords { game_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("unknown game type: {name}")]
pub struct UnknownGameType {
    pub name: String,
}
