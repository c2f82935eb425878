use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::{UnknownGameType, UserId};

/// How many past daily words are remembered to avoid repeats
pub const PREVIOUS_WORDS_LIMIT: usize = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameType {
    Wordle,
    Ordle,
    Stepdle,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::Wordle, GameType::Ordle, GameType::Stepdle];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Wordle => "wordle",
            GameType::Ordle => "ordle",
            GameType::Stepdle => "stepdle",
        }
    }

    /// Guess budget for a whole game of this type
    pub fn max_guesses(&self) -> usize {
        match self {
            GameType::Wordle | GameType::Ordle => 6,
            GameType::Stepdle => 20,
        }
    }

    /// Target word lengths, in the order they must be solved
    pub fn word_lengths(&self) -> &'static [usize] {
        match self {
            GameType::Wordle | GameType::Ordle => &[5],
            GameType::Stepdle => &[4, 5, 6, 7],
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wordle" => Ok(GameType::Wordle),
            "ordle" => Ok(GameType::Ordle),
            "stepdle" => Ok(GameType::Stepdle),
            other => Err(UnknownGameType {
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LetterVerdict {
    Correct, // Green - correct letter in correct position
    Present, // Yellow - correct letter in wrong position
    Absent,  // Gray - letter not in word
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterResult {
    pub letter: char,
    pub verdict: LetterVerdict,
    pub position: u32,
}

/// One finished (or abandoned) daily game of one user. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayedGame {
    pub user_id: UserId,
    pub game_type: GameType,
    #[ts(type = "number")]
    pub start_time: i64, // Unix milliseconds
    #[ts(type = "number")]
    pub end_time: i64, // Unix milliseconds
    pub guesses: Vec<String>,
    pub number_of_guesses: u32,
    pub word: String,
    pub won_game: bool,
}

impl PlayedGame {
    /// Time spent on the game in milliseconds, never negative
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).max(0)
    }
}

/// The words of the day for one game type and the history used to avoid repeats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyGame {
    pub game_type: GameType,
    pub daily_words: Vec<String>,
    pub previous_words: Vec<String>,
}

impl DailyGame {
    pub fn empty(game_type: GameType) -> Self {
        Self {
            game_type,
            daily_words: Vec::new(),
            previous_words: Vec::new(),
        }
    }
}
