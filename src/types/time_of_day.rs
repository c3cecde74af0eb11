//! Time-of-day values exchanged with jobs and the route optimizer
//!
//! Values are kept in their canonical zero-padded `HH:mm` form. Ordering is a
//! plain string compare on that form, which is what the placement tiers sort
//! and overlap-test on; durations go through `chrono`.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A wall-clock time of day, canonicalized to `HH:mm`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    text: String,
    time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day {0:?}, expected HH:mm or HH:mm:ss")]
pub struct InvalidTimeOfDay(pub String);

impl TimeOfDay {
    /// Parse `HH:mm` or `HH:mm:ss`. Seconds are dropped.
    pub fn parse(value: &str) -> Result<Self, InvalidTimeOfDay> {
        let trimmed = value.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| InvalidTimeOfDay(value.to_string()))?;

        Ok(Self::from_naive(time))
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        let time = time.with_second(0).unwrap_or(time).with_nanosecond(0).unwrap_or(time);
        Self {
            text: time.format("%H:%M").to_string(),
            time,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        self.time
    }

    /// Whole minutes from `self` to `later` (negative if `later` is earlier)
    pub fn minutes_until(&self, later: &TimeOfDay) -> i64 {
        (later.time - self.time).num_minutes()
    }
}

impl PartialEq for TimeOfDay {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TimeOfDay {}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = InvalidTimeOfDay;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.text
    }
}
