use mindle_core::{DayBoundary, StreakPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// How a new play is folded into the stored statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsStrategy {
    /// Running mean over the stored stats
    #[default]
    Incremental,
    /// Recompute from every stored record of the pair
    Recompute,
}

impl FromStr for StatsStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "incremental" => Ok(StatsStrategy::Incremental),
            "recompute" => Ok(StatsStrategy::Recompute),
            other => Err(anyhow::anyhow!("Unknown stats strategy: {}", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub words_directory: String,
    /// Hours east of UTC where a new day starts
    pub day_offset_hours: i32,
    /// Hours after the start of a day at which the daily job runs.
    /// Zero rolls words and boards over together with the day itself.
    pub daily_job_hour: u32,
    pub stats_strategy: StatsStrategy,
    pub streak_policy: StreakPolicy,
    pub max_stats_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://mindle.db?mode=rwc".to_string()),
            words_directory: lookup("WORDS_DIRECTORY")
                .unwrap_or_else(|| "./shared/words".to_string()),
            day_offset_hours: parse(&lookup, "DAY_OFFSET_HOURS", "2")?,
            daily_job_hour: parse(&lookup, "DAILY_JOB_HOUR", "0")?,
            stats_strategy: parse(&lookup, "STATS_STRATEGY", "incremental")?,
            streak_policy: parse(&lookup, "STREAK_POLICY", "strict")?,
            max_stats_retries: parse(&lookup, "MAX_STATS_RETRIES", "5")?,
        };

        if config.daily_job_hour > 23 {
            return Err(ConfigError::Invalid {
                key: "DAILY_JOB_HOUR",
                value: config.daily_job_hour.to_string(),
                reason: "must be between 0 and 23".to_string(),
            });
        }
        if config.max_stats_retries == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_STATS_RETRIES",
                value: "0".to_string(),
                reason: "at least one attempt is needed".to_string(),
            });
        }
        config.day_boundary()?;

        Ok(config)
    }

    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        DayBoundary::from_hours(self.day_offset_hours).map_err(|e| ConfigError::Invalid {
            key: "DAY_OFFSET_HOURS",
            value: self.day_offset_hours.to_string(),
            reason: e.to_string(),
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.day_offset_hours, 2);
        assert_eq!(config.daily_job_hour, 0);
        assert_eq!(config.stats_strategy, StatsStrategy::Incremental);
        assert_eq!(config.streak_policy, StreakPolicy::Strict);
        assert_eq!(config.max_stats_retries, 5);
        assert_eq!(config.day_boundary().unwrap(), DayBoundary::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DAY_OFFSET_HOURS", "-5"),
            ("STATS_STRATEGY", "recompute"),
            ("STREAK_POLICY", "grace"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.day_offset_hours, -5);
        assert_eq!(config.stats_strategy, StatsStrategy::Recompute);
        assert_eq!(config.streak_policy, StreakPolicy::GraceUntilDayEnds);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("DAILY_JOB_HOUR", "24")]).is_err());
        assert!(config_from(&[("DAILY_JOB_HOUR", "noon")]).is_err());
        assert!(config_from(&[("DAY_OFFSET_HOURS", "40")]).is_err());
        assert!(config_from(&[("MAX_STATS_RETRIES", "0")]).is_err());

        let err = config_from(&[("STATS_STRATEGY", "guess")]).unwrap_err();
        assert!(err.to_string().contains("STATS_STRATEGY"));
    }
}
