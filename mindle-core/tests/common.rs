#![allow(dead_code)]

use mindle_core::WordValidator;
use mindle_types::{GameType, PlayedGame};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

// 2024-03-10 12:00 UTC
pub const NOON: i64 = 1_710_072_000_000;

/// Creates a test WordValidator with a known set of words
pub fn create_test_validator() -> WordValidator {
    let word_list = "boat\ncoat\nhello\nworld\nhouse\nmouse\ntrain\nplane\ncrane\ntoast\nplanet\nfreedom";
    WordValidator::from_word_list(word_list)
}

/// Creates a finished game of `user` started `days_ago` days before [`NOON`]
pub fn create_played_game(
    user: &str,
    game_type: GameType,
    days_ago: i64,
    guesses: u32,
    seconds: i64,
    won: bool,
) -> PlayedGame {
    let start_time = NOON - days_ago * DAY_MS;
    PlayedGame {
        user_id: user.to_string(),
        game_type,
        start_time,
        end_time: start_time + seconds * 1000,
        guesses: vec!["crane".to_string(); guesses as usize],
        number_of_guesses: guesses,
        word: "toast".to_string(),
        won_game: won,
    }
}
