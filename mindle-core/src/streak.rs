use mindle_types::PlayedGame;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::{CalendarDay, DayBoundary};

/// How a day without a play yet is treated when counting a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Only a play on the current day keeps the streak alive
    #[default]
    Strict,
    /// The current day may still be played; counting starts from yesterday until then
    GraceUntilDayEnds,
}

impl FromStr for StreakPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(StreakPolicy::Strict),
            "grace" | "grace_until_day_ends" => Ok(StreakPolicy::GraceUntilDayEnds),
            other => Err(anyhow::anyhow!("Unknown streak policy: {}", other)),
        }
    }
}

/// Number of consecutive calendar days, ending at `as_of_ms`, with at least one play
pub fn consecutive_days(
    records: &[PlayedGame],
    as_of_ms: i64,
    boundary: &DayBoundary,
    policy: StreakPolicy,
) -> u32 {
    let played_days: HashSet<CalendarDay> = records
        .iter()
        .map(|record| boundary.day_of(record.start_time))
        .collect();

    let today = boundary.day_of(as_of_ms);
    let mut day = match policy {
        StreakPolicy::GraceUntilDayEnds if !played_days.contains(&today) => today.previous(),
        _ => today,
    };

    let mut streak = 0;
    while played_days.contains(&day) {
        streak += 1;
        day = day.previous();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DAY_MS;
    use mindle_types::GameType;

    // 2024-03-10 12:00 UTC
    const NOON: i64 = 1_710_072_000_000;

    fn played_on(days_ago: i64) -> PlayedGame {
        let start = NOON - days_ago * DAY_MS;
        PlayedGame {
            user_id: "user-1".to_string(),
            game_type: GameType::Wordle,
            start_time: start,
            end_time: start + 60_000,
            guesses: vec!["toast".to_string()],
            number_of_guesses: 1,
            word: "toast".to_string(),
            won_game: true,
        }
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let records = vec![played_on(0), played_on(1), played_on(2), played_on(4)];
        let streak = consecutive_days(&records, NOON, &DayBoundary::utc(), StreakPolicy::Strict);
        assert_eq!(streak, 3);
    }

    #[test]
    fn test_multiple_plays_on_one_day_count_once() {
        let records = vec![played_on(0), played_on(0), played_on(1)];
        let streak = consecutive_days(&records, NOON, &DayBoundary::utc(), StreakPolicy::Strict);
        assert_eq!(streak, 2);
    }

    #[test]
    fn test_strict_policy_needs_a_play_today() {
        let records = vec![played_on(1), played_on(2)];
        let streak = consecutive_days(&records, NOON, &DayBoundary::utc(), StreakPolicy::Strict);
        assert_eq!(streak, 0);
    }

    #[test]
    fn test_grace_policy_counts_from_yesterday() {
        let records = vec![played_on(1), played_on(2), played_on(3)];
        let boundary = DayBoundary::utc();

        assert_eq!(
            consecutive_days(&records, NOON, &boundary, StreakPolicy::GraceUntilDayEnds),
            3
        );

        // A missed yesterday ends the streak even with grace
        let records = vec![played_on(2), played_on(3)];
        assert_eq!(
            consecutive_days(&records, NOON, &boundary, StreakPolicy::GraceUntilDayEnds),
            0
        );
    }

    #[test]
    fn test_grace_policy_includes_today_once_played() {
        let records = vec![played_on(0), played_on(1)];
        let streak = consecutive_days(
            &records,
            NOON,
            &DayBoundary::utc(),
            StreakPolicy::GraceUntilDayEnds,
        );
        assert_eq!(streak, 2);
    }

    #[test]
    fn test_day_boundary_offset_is_respected() {
        // 23:30 UTC yesterday is already today at +02:00
        let mut late = played_on(1);
        late.start_time = NOON - 12 * 60 * 60 * 1000 - 30 * 60 * 1000;

        let records = vec![late];
        let boundary = DayBoundary::from_hours(2).unwrap();
        assert_eq!(consecutive_days(&records, NOON, &boundary, StreakPolicy::Strict), 1);
        assert_eq!(
            consecutive_days(&records, NOON, &DayBoundary::utc(), StreakPolicy::Strict),
            0
        );
    }

    #[test]
    fn test_no_records() {
        assert_eq!(
            consecutive_days(&[], NOON, &DayBoundary::default(), StreakPolicy::Strict),
            0
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<StreakPolicy>().unwrap(), StreakPolicy::Strict);
        assert_eq!("GRACE".parse::<StreakPolicy>().unwrap(), StreakPolicy::GraceUntilDayEnds);
        assert!("lenient".parse::<StreakPolicy>().is_err());
    }
}
