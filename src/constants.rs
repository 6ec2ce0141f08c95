//! Centralized constants for keepawake
//!
//! This module contains all configurable numerical values used throughout
//! the application. Each constant includes documentation on its purpose,
//! unit, and recommended value range.

/// Human readable application name, shown in help and the startup banner.
pub const APP_NAME: &str = "Keep Soundbar Awake";

/// Name of the installed binary, used as clap's program name.
pub const BIN_NAME: &str = "keepawake";

// ============================================================================
// SCHEDULING
// ============================================================================

/// Default interval between tones.
/// Unit: minutes
/// Recommended range: 1-15 (most soundbars sleep after 10-20 minutes of silence)
pub const DEFAULT_PERIOD_MINUTES: u64 = 5;

/// Longest accepted interval between tones (one week).
/// Unit: minutes
/// Range: anything much larger defeats the purpose and risks timer overflow
pub const MAX_PERIOD_MINUTES: u64 = 7 * 24 * 60;

/// Seconds in one day; also the value of the 24:00 end-of-day bound.
/// Unit: seconds
/// Range: Fixed, do not change
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Name given to the background scheduler thread.
pub const SCHEDULER_THREAD_NAME: &str = "keepawake-scheduler";

// ============================================================================
// PLAYBACK
// ============================================================================

/// Volume applied to the playback sink for every tone.
/// Unit: linear gain (1.0 = unchanged)
/// Recommended range: 0.2-1.0 (too low and some amplifiers won't detect a signal)
pub const PLAYBACK_VOLUME: f32 = 0.5;

// ============================================================================
// TONE SYNTHESIS
// ============================================================================

/// Frequency of the default keep-awake tone, above most adults' hearing.
/// Unit: Hz
/// Range: must stay below TONE_SAMPLE_RATE / 2
pub const SILENT_TONE_HZ: f32 = 19_000.0;

/// Frequency of the audible test tone (`--test`).
/// Unit: Hz
pub const TEST_TONE_HZ: f32 = 1_000.0;

/// Length of each tone.
/// Unit: seconds
/// Recommended range: 1-5
pub const TONE_DURATION_SECS: u32 = 3;

/// Sample rate of the synthesised WAV buffer.
/// Unit: Hz
pub const TONE_SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude of the synthesised sine before the playback volume is applied.
/// Unit: fraction of full scale (0.0-1.0)
pub const TONE_AMPLITUDE: f32 = 0.5;

/// Linear fade applied at both ends of the tone to avoid audible clicks.
/// Unit: milliseconds
/// Recommended range: 5-50
pub const TONE_FADE_MS: u32 = 20;
