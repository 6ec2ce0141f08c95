//! Time-of-day values and the active window that gates each tick.
//!
//! A window is written `HH:mm-HH:mm` on the command line. Bounds are
//! inclusive, the end may be `24:00`, and a start later than the end means the
//! window runs across midnight (`22:00-06:00`).

use crate::constants::SECONDS_PER_DAY;
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowParseError {
    #[error("expected a range in HH:mm-HH:mm format, got '{0}'")]
    Separator(String),

    #[error("'{0}' is not a valid time of day")]
    InvalidTime(String),

    #[error("window cannot start at 24:00")]
    StartsAtEndOfDay,
}

/// A point in the day with one-second resolution, from 00:00 up to and
/// including 24:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(SECONDS_PER_DAY);

    /// Returns None for anything past 24:00:00.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes > 59 || seconds > 59 {
            return None;
        }
        let total = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
        (total <= SECONDS_PER_DAY).then_some(TimeOfDay(total))
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        TimeOfDay(time.num_seconds_from_midnight())
    }
}

impl FromStr for TimeOfDay {
    type Err = WindowParseError;

    /// Accepts `H:mm`, `HH:mm` and `HH:mm:ss`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowParseError::InvalidTime(s.to_string());
        let trimmed = s.trim();

        let fields: Vec<&str> = trimmed.split(':').collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(invalid());
        }

        let mut numbers = [0u32; 3];
        for (i, field) in fields.iter().enumerate() {
            // hours may be a single digit, minutes and seconds never
            let min_len = if i == 0 { 1 } else { 2 };
            if field.len() < min_len
                || field.len() > 2
                || !field.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(invalid());
            }
            numbers[i] = field.parse().map_err(|_| invalid())?;
        }

        TimeOfDay::from_hms(numbers[0], numbers[1], numbers[2]).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        if seconds == 0 {
            write!(f, "{:02}:{:02}", hours, minutes)
        } else {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}

/// Inclusive range of the day during which tones may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    pub const FULL_DAY: TimeWindow = TimeWindow {
        start: TimeOfDay::MIDNIGHT,
        end: TimeOfDay::END_OF_DAY,
    };

    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, WindowParseError> {
        if start >= TimeOfDay::END_OF_DAY {
            return Err(WindowParseError::StartsAtEndOfDay);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// True when the window runs across midnight, e.g. 22:00-06:00.
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, now: TimeOfDay) -> bool {
        if self.wraps_midnight() {
            now >= self.start || now <= self.end
        } else {
            now >= self.start && now <= self.end
        }
    }
}

impl FromStr for TimeWindow {
    type Err = WindowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [start, end] = parts.as_slice() else {
            return Err(WindowParseError::Separator(s.to_string()));
        };
        TimeWindow::new(start.parse()?, end.parse()?)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
