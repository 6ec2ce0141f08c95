//! Runtime configuration for keepawake
//!
//! Everything comes from the command line (see the cli module); there is no
//! config file and no environment override. A malformed `--between` value is
//! not fatal: it logs a warning and leaves the tool running all day.

use crate::audio::tone::ToneKind;
use crate::cli::Args;
use crate::constants::DEFAULT_PERIOD_MINUTES;
use crate::schedule::window::TimeWindow;
use log::{info, warn};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Resolved, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub period_minutes: u64,
    /// None when no usable `--between` was given: tones play all day
    pub window: Option<TimeWindow>,
    pub tone: ToneKind,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_minutes: DEFAULT_PERIOD_MINUTES,
            window: None,
            tone: ToneKind::Silent,
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            period_minutes: args.period,
            window: args.between.as_deref().and_then(parse_window),
            tone: ToneKind::from_test_flag(args.test),
            verbose: args.verbose,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_minutes.saturating_mul(60))
    }

    pub fn window_enabled(&self) -> bool {
        self.window.is_some()
    }

    /// Log the settings that differ from the defaults.
    pub fn log_overrides(&self) {
        if let Some(window) = self.window {
            info!("Operating between {} and {}.", window.start(), window.end());
        }
        if self.period_minutes != DEFAULT_PERIOD_MINUTES {
            info!("Using a period of {} minutes", self.period_minutes);
        }
        if self.tone == ToneKind::Test {
            info!("Using {}", self.tone);
        }
    }
}

/// Parse a `--between` value, falling back to no window on bad input.
fn parse_window(raw: &str) -> Option<TimeWindow> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse::<TimeWindow>() {
        Ok(window) => {
            if window.wraps_midnight() {
                info!("Window {} runs across midnight", window);
            }
            Some(window)
        }
        Err(e) => {
            warn!(
                "Invalid --between format '{}' ({}). Using default (24 hours).",
                raw, e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::window::TimeOfDay;

    fn hm(hours: u32, minutes: u32) -> TimeOfDay {
        TimeOfDay::from_hms(hours, minutes, 0).unwrap()
    }

    #[test]
    fn test_parse_window_valid_values() {
        let window = parse_window("08:30-17:30").unwrap();
        assert_eq!(window.start(), hm(8, 30));
        assert_eq!(window.end(), hm(17, 30));

        // End may be exactly 24:00
        let window = parse_window("00:00-24:00").unwrap();
        assert_eq!(window, TimeWindow::FULL_DAY);

        // Start after end is accepted
        assert!(parse_window("22:00-06:00").is_some());
    }

    #[test]
    fn test_parse_window_falls_back_on_malformed_input() {
        assert_eq!(parse_window("08:00"), None, "Should reject missing end");
        assert_eq!(
            parse_window("08:00-12:00-17:00"),
            None,
            "Should reject too many separators"
        );
        assert_eq!(parse_window("25:00-26:00"), None, "Should reject hour 25");
        assert_eq!(parse_window("24:00-24:00"), None, "Should reject start at 24:00");
        assert_eq!(parse_window("08:60-17:00"), None, "Should reject minute 60");
        assert_eq!(parse_window("8am-5pm"), None, "Should reject non-numeric");
        assert_eq!(parse_window(""), None, "Should ignore empty value");
    }

    #[test]
    fn test_period_is_in_minutes() {
        let config = Config {
            period_minutes: 10,
            ..Config::default()
        };
        assert_eq!(config.period(), Duration::from_secs(600));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.period_minutes, 5);
        assert!(!config.window_enabled());
        assert_eq!(config.tone, ToneKind::Silent);
        assert!(!config.verbose);
    }
}
