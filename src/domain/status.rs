//! Event lifecycle phase and countdown text.
//!
//! Everything here takes the current instant as a parameter; nothing reads
//! the wall clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::EXPIRED_LABEL;

const MS_PER_MINUTE: u64 = 60 * 1000;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Expired,
}

impl EventStatus {
    /// Classifies `now` against the window `[starts_at, expires_at]`.
    /// Both ends are inclusive, so a boundary instant is `Ongoing`.
    pub fn derive(starts_at: DateTime<Utc>, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < starts_at {
            EventStatus::Upcoming
        } else if now <= expires_at {
            EventStatus::Ongoing
        } else {
            EventStatus::Expired
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Expired => "expired",
        }
    }

    /// Badge variant used by the templates
    pub fn badge_variant(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "secondary",
            EventStatus::Ongoing => "default",
            EventStatus::Expired => "destructive",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days, hours and minutes left over from a millisecond span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl Countdown {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days : {} hours : {} minutes",
            self.days, self.hours, self.minutes
        )
    }
}

/// Human readable countdown towards the next boundary of the event window.
pub fn time_display(starts_at: DateTime<Utc>, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (prefix, target) = match EventStatus::derive(starts_at, expires_at, now) {
        EventStatus::Expired => return EXPIRED_LABEL.to_string(),
        EventStatus::Upcoming => ("Starting in", starts_at),
        EventStatus::Ongoing => ("Ending in", expires_at),
    };

    let diff_ms = (target - now).num_milliseconds().unsigned_abs();
    format!("{} {}", prefix, Countdown::from_millis(diff_ms))
}
