use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Aggregated results of one user for one game type.
///
/// Every field is `-1` when the user has no recorded game of that type,
/// matching the documents the UI already reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameStats {
    pub average_guesses: f64,
    pub average_time: f64, // milliseconds
    #[ts(type = "number")]
    pub total_games_played: i64,
    pub win_rate: f64, // 0..1
}

impl GameStats {
    pub const NO_DATA: GameStats = GameStats {
        average_guesses: -1.0,
        average_time: -1.0,
        total_games_played: -1,
        win_rate: -1.0,
    };

    pub fn no_data() -> Self {
        Self::NO_DATA
    }

    pub fn has_data(&self) -> bool {
        self.total_games_played > 0
    }

    /// Number of games folded into these stats, zero for the sentinel
    pub fn games_counted(&self) -> i64 {
        self.total_games_played.max(0)
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::NO_DATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_sentinel() {
        let stats = GameStats::default();
        assert!(!stats.has_data());
        assert_eq!(stats.games_counted(), 0);
        assert_eq!(stats.average_guesses, -1.0);
        assert_eq!(stats.win_rate, -1.0);

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalGamesPlayed"], -1);
        assert_eq!(json["averageTime"], -1.0);
    }
}
