use mindle_types::{
    DailyLeaderboardEntry, GameStats, GameType, GeneralLeaderboardEntry, PlayedGame, UserId,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::{DayWindow, StatsAggregator};

/// Display names of known users, keyed by user id
pub type UserDirectory = HashMap<UserId, String>;

pub struct LeaderboardBuilder;

impl LeaderboardBuilder {
    /// Rank the plays of one game type started inside `window`.
    ///
    /// Fewer average guesses rank first, then the shorter average time.
    pub fn daily(
        game_type: GameType,
        records: &[PlayedGame],
        window: DayWindow,
        directory: &UserDirectory,
    ) -> Vec<DailyLeaderboardEntry> {
        let mut per_user: BTreeMap<&str, Vec<&PlayedGame>> = BTreeMap::new();
        for record in records
            .iter()
            .filter(|r| r.game_type == game_type && window.contains(r.start_time))
        {
            per_user.entry(record.user_id.as_str()).or_default().push(record);
        }

        let mut entries: Vec<DailyLeaderboardEntry> = per_user
            .into_iter()
            .filter_map(|(user_id, plays)| {
                let Some(name) = directory.get(user_id) else {
                    warn!("Skipping {} leaderboard entry for unknown user {}", game_type, user_id);
                    return None;
                };

                let stats = StatsAggregator::aggregate(plays);
                Some(DailyLeaderboardEntry {
                    user: name.clone(),
                    average_guesses: stats.average_guesses,
                    average_time: stats.average_time / 1000.0,
                })
            })
            .collect();

        entries.sort_by(Self::daily_order);
        entries
    }

    /// Rank users across every game type they have stats for.
    ///
    /// Win rate and time are averaged over the non-empty stats of each user;
    /// a higher win rate ranks first, then the shorter average time.
    pub fn general(
        stats_per_user: &HashMap<UserId, Vec<GameStats>>,
        directory: &UserDirectory,
    ) -> Vec<GeneralLeaderboardEntry> {
        let mut entries: Vec<GeneralLeaderboardEntry> = stats_per_user
            .iter()
            .filter_map(|(user_id, all_stats)| {
                let played: Vec<&GameStats> = all_stats.iter().filter(|s| s.has_data()).collect();
                if played.is_empty() {
                    return None;
                }

                let Some(name) = directory.get(user_id) else {
                    warn!("Skipping general leaderboard entry for unknown user {}", user_id);
                    return None;
                };

                let count = played.len() as f64;
                let win_rate: f64 = played.iter().map(|s| s.win_rate).sum::<f64>() / count;
                let time: f64 = played.iter().map(|s| s.average_time).sum::<f64>() / count;

                Some(GeneralLeaderboardEntry {
                    user: name.clone(),
                    average_win_rate: win_rate,
                    average_time: time / 1000.0,
                })
            })
            .collect();

        entries.sort_by(Self::general_order);
        entries
    }

    fn daily_order(a: &DailyLeaderboardEntry, b: &DailyLeaderboardEntry) -> Ordering {
        a.average_guesses
            .total_cmp(&b.average_guesses)
            .then(a.average_time.total_cmp(&b.average_time))
            .then_with(|| a.user.cmp(&b.user))
    }

    fn general_order(a: &GeneralLeaderboardEntry, b: &GeneralLeaderboardEntry) -> Ordering {
        b.average_win_rate
            .total_cmp(&a.average_win_rate)
            .then(a.average_time.total_cmp(&b.average_time))
            .then_with(|| a.user.cmp(&b.user))
    }
}
