use mindle_types::{GameStats, PlayedGame};

pub struct StatsAggregator;

impl StatsAggregator {
    /// Recompute stats from every record of one (user, game type) pair.
    /// An empty set yields [`GameStats::NO_DATA`].
    pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a PlayedGame>) -> GameStats {
        let records: Vec<&PlayedGame> = records.into_iter().collect();
        if records.is_empty() {
            return GameStats::NO_DATA;
        }

        let total = records.len() as f64;
        let guesses: f64 = records.iter().map(|r| f64::from(r.number_of_guesses)).sum();
        let time: f64 = records.iter().map(|r| r.duration_ms() as f64).sum();
        let wins = records.iter().filter(|r| r.won_game).count() as f64;

        GameStats {
            average_guesses: guesses / total,
            average_time: time / total,
            total_games_played: records.len() as i64,
            win_rate: wins / total,
        }
    }

    /// Fold one new record into previously stored stats.
    ///
    /// Uses the running mean `(avg * n + value) / (n + 1)`; a previous value
    /// without data is seeded from the record alone.
    pub fn fold(previous: &GameStats, record: &PlayedGame) -> GameStats {
        let won = if record.won_game { 1.0 } else { 0.0 };

        if !previous.has_data() {
            return GameStats {
                average_guesses: f64::from(record.number_of_guesses),
                average_time: record.duration_ms() as f64,
                total_games_played: 1,
                win_rate: won,
            };
        }

        let n = previous.games_counted() as f64;
        let running = |average: f64, value: f64| (average * n + value) / (n + 1.0);

        GameStats {
            average_guesses: running(previous.average_guesses, f64::from(record.number_of_guesses)),
            average_time: running(previous.average_time, record.duration_ms() as f64),
            total_games_played: previous.games_counted() + 1,
            win_rate: running(previous.win_rate, won),
        }
    }

    /// Fold a whole ordered log, starting from no data
    pub fn fold_all<'a>(records: impl IntoIterator<Item = &'a PlayedGame>) -> GameStats {
        records
            .into_iter()
            .fold(GameStats::NO_DATA, |stats, record| Self::fold(&stats, record))
    }
}
