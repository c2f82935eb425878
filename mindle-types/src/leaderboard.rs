use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::{GameType, UnknownGameType};

/// Entry of the per-game daily board, ranked by fewest guesses then fastest time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyLeaderboardEntry {
    pub user: String,
    pub average_guesses: f64,
    pub average_time: f64, // seconds
}

/// Entry of the cross-game board, ranked by win rate then fastest time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneralLeaderboardEntry {
    pub user: String,
    pub average_win_rate: f64,
    pub average_time: f64, // seconds
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "leaderboard", rename_all = "lowercase")]
#[ts(export)]
pub enum Leaderboard {
    Daily(Vec<DailyLeaderboardEntry>),
    General(Vec<GeneralLeaderboardEntry>),
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        match self {
            Leaderboard::Daily(entries) => entries.len(),
            Leaderboard::General(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A board of the right shape for `kind` with no entries
    pub fn empty(kind: LeaderboardKind) -> Self {
        match kind {
            LeaderboardKind::General => Leaderboard::General(Vec::new()),
            LeaderboardKind::Daily(_) => Leaderboard::Daily(Vec::new()),
        }
    }

    pub fn matches(&self, kind: LeaderboardKind) -> bool {
        matches!(
            (self, kind),
            (Leaderboard::General(_), LeaderboardKind::General)
                | (Leaderboard::Daily(_), LeaderboardKind::Daily(_))
        )
    }
}

/// Which stored board a leaderboard document replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    General,
    Daily(GameType),
}

impl LeaderboardKind {
    pub fn key(&self) -> &'static str {
        match self {
            LeaderboardKind::General => "general",
            LeaderboardKind::Daily(game_type) => game_type.as_str(),
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LeaderboardKind {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("general") {
            return Ok(LeaderboardKind::General);
        }
        s.parse().map(LeaderboardKind::Daily)
    }
}
