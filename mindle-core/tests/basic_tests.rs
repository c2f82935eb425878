mod common;

use common::*;
use mindle_core::{
    DayBoundary, GameSession, GuessEvaluator, LeaderboardBuilder, SessionStatus, StatsAggregator,
    StreakPolicy, UserDirectory, consecutive_days,
};
use mindle_types::{GameStats, GameType, LetterVerdict};

#[test]
fn test_word_validator() {
    let validator = create_test_validator();
    assert!(validator.is_valid_word("toast"));
    assert!(validator.is_valid_word("freedom"));
    assert!(!validator.is_valid_word("invalid"));
}

#[test]
fn test_evaluator_duplicate_letters() {
    use LetterVerdict::*;
    assert_eq!(
        GuessEvaluator::evaluate("abca", "aabb").unwrap(),
        vec![Correct, Present, Present, Absent]
    );
}

#[test]
fn test_session_record_feeds_statistics() {
    let validator = create_test_validator();
    let mut session = GameSession::new(
        GameType::Wordle,
        "alice".to_string(),
        vec!["toast".to_string()],
        NOON,
    )
    .unwrap();

    session.submit_guess("crane", &validator, NOON + 10_000).unwrap();
    let outcome = session.submit_guess("toast", &validator, NOON + 40_000).unwrap();
    assert_eq!(outcome.status, SessionStatus::Won);

    let record = session.played_game().unwrap();
    let folded = StatsAggregator::fold(&GameStats::NO_DATA, &record);
    assert_eq!(folded, StatsAggregator::aggregate([&record]));
    assert_eq!(folded.average_guesses, 2.0);
    assert_eq!(folded.average_time, 40_000.0);
}

#[test]
fn test_daily_leaderboard_from_records() {
    let records = vec![
        create_played_game("alice", GameType::Wordle, 0, 3, 50, true),
        create_played_game("bob", GameType::Wordle, 0, 2, 80, true),
        create_played_game("bob", GameType::Wordle, 1, 1, 5, true),
    ];
    let directory: UserDirectory = [("alice", "Alice"), ("bob", "Bob")]
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();

    let window = DayBoundary::utc().window_containing(NOON);
    let board = LeaderboardBuilder::daily(GameType::Wordle, &records, window, &directory);

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user, "Bob");
    assert_eq!(board[0].average_guesses, 2.0);
    assert_eq!(board[1].user, "Alice");
}

#[test]
fn test_streak_across_game_types() {
    let records = vec![
        create_played_game("alice", GameType::Wordle, 0, 3, 50, true),
        create_played_game("alice", GameType::Stepdle, 1, 9, 300, false),
        create_played_game("alice", GameType::Ordle, 2, 4, 60, true),
    ];

    let streak = consecutive_days(&records, NOON, &DayBoundary::utc(), StreakPolicy::Strict);
    assert_eq!(streak, 3);
}
