use anyhow::{Result, anyhow};
use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const HOUR_MS: i64 = 60 * 60 * 1000;
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// A calendar day, counted in days since 1970-01-01 at the boundary's offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDay(pub i64);

impl CalendarDay {
    pub fn from_date(date: NaiveDate) -> Self {
        CalendarDay(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE)
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        let days = i32::try_from(self.0 + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }

    pub fn previous(self) -> Self {
        CalendarDay(self.0 - 1)
    }

    pub fn next(self) -> Self {
        CalendarDay(self.0 + 1)
    }
}

/// Inclusive millisecond range covering one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: i64,
    pub end: i64,
}

impl DayWindow {
    pub fn starting_at(start: i64) -> Self {
        Self {
            start,
            end: start + DAY_MS - 1,
        }
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        (self.start..=self.end).contains(&timestamp_ms)
    }
}

/// Where one day ends and the next begins, as a fixed offset from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset_ms: i64,
}

impl DayBoundary {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset_ms: i64::from(offset.local_minus_utc()) * 1000,
        }
    }

    pub fn utc() -> Self {
        Self { offset_ms: 0 }
    }

    pub fn from_hours(hours: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| anyhow!("Invalid day offset of {} hours", hours))?;
        Ok(Self::new(offset))
    }

    pub fn day_of(&self, timestamp_ms: i64) -> CalendarDay {
        CalendarDay((timestamp_ms + self.offset_ms).div_euclid(DAY_MS))
    }

    pub fn window(&self, day: CalendarDay) -> DayWindow {
        DayWindow::starting_at(day.0 * DAY_MS - self.offset_ms)
    }

    pub fn window_containing(&self, timestamp_ms: i64) -> DayWindow {
        self.window(self.day_of(timestamp_ms))
    }

    /// First moment strictly after `now_ms` whose local time is `hour`:00
    pub fn next_occurrence_of_hour(&self, now_ms: i64, hour: u32) -> i64 {
        let today = self.window_containing(now_ms);
        let candidate = today.start + i64::from(hour % 24) * HOUR_MS;
        if candidate > now_ms {
            candidate
        } else {
            candidate + DAY_MS
        }
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        // Swedish summer time, where the game was first hosted
        Self { offset_ms: 2 * HOUR_MS }
    }
}
