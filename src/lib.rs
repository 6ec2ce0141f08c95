// Library interface for keepawake
// The binary and the integration tests both go through these modules

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod schedule;

pub use audio::rodio_output::RodioOutput;
pub use audio::tone::{Tone, ToneKind};
pub use audio::{AudioError, ToneOutput};
pub use config::{Config, ConfigError};
pub use schedule::window::{TimeOfDay, TimeWindow};
pub use schedule::{Scheduler, SchedulerError, SchedulerHandle, TickOutcome, TickStats};
