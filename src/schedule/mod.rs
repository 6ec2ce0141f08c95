//! Periodic tone playback.
//!
//! A [`Scheduler`] is turned into a running worker thread by
//! [`Scheduler::start`]. The worker owns the audio output and wakes once per
//! period; cancellation arrives over a channel held by the returned
//! [`SchedulerHandle`], so shutdown always cancels, joins the worker and only
//! then releases the output device.

pub mod clock;
pub mod window;

use crate::audio::tone::Tone;
use crate::audio::{AudioError, ToneOutput};
use crate::config::Config;
use crate::constants::{PLAYBACK_VOLUME, SCHEDULER_THREAD_NAME};
use clock::{Clock, LocalClock};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use window::{TimeOfDay, TimeWindow};

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("scheduler thread exited before the audio output was ready")]
    WorkerExited,
}

/// What happened on a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Played,
    OutsideWindow,
    Failed,
}

/// Running totals of tick outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub played: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl TickStats {
    pub fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Played => self.played += 1,
            TickOutcome::OutsideWindow => self.skipped += 1,
            TickOutcome::Failed => self.failed += 1,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.played + self.skipped + self.failed
    }
}

pub struct Scheduler {
    period: Duration,
    window: Option<TimeWindow>,
    tone: Tone,
    volume: f32,
    clock: Box<dyn Clock>,
}

impl Scheduler {
    /// `window` of None means tones play at any time of day.
    pub fn new(period: Duration, window: Option<TimeWindow>, tone: Tone) -> Self {
        Self {
            period,
            window,
            tone,
            volume: PLAYBACK_VOLUME,
            clock: Box::new(LocalClock),
        }
    }

    pub fn from_config(config: &Config, tone: Tone) -> Self {
        Self::new(config.period(), config.window, tone)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run one tick: check the window, then try to play the tone.
    ///
    /// Playback errors are logged and reported as [`TickOutcome::Failed`];
    /// they never propagate.
    pub fn tick(&self, output: &mut dyn ToneOutput) -> TickOutcome {
        if let Some(window) = self.window {
            let now = TimeOfDay::from_naive_time(self.clock.time_of_day());
            if !window.contains(now) {
                info!("Outside working hours ({}). Skipping tone.", window);
                return TickOutcome::OutsideWindow;
            }
        }

        match output.play(&self.tone, self.volume) {
            Ok(()) => {
                info!(
                    "Played tone at {}",
                    self.clock.time_of_day().format("%H:%M:%S")
                );
                TickOutcome::Played
            }
            Err(e) => {
                error!("Error playing {}: {}", self.tone.kind(), e);
                TickOutcome::Failed
            }
        }
    }

    /// Spawn the worker thread and open the audio output on it.
    ///
    /// Blocks until `open_output` has returned so that a missing device is
    /// reported here rather than on the first tick. The first tick fires one
    /// full period after this returns.
    pub fn start<O, F>(self, open_output: F) -> Result<SchedulerHandle, SchedulerError>
    where
        O: ToneOutput + 'static,
        F: FnOnce() -> Result<O, AudioError> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), AudioError>>(1);
        let stats = Arc::new(Mutex::new(TickStats::default()));
        let worker_stats = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(SCHEDULER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut output = match open_output() {
                    Ok(output) => {
                        let _ = ready_tx.send(Ok(()));
                        output
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                debug!("Scheduler thread started, period {:?}", self.period);
                self.run(&mut output, &cancel_rx, &worker_stats);
                debug!("Scheduler thread exiting");
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(SchedulerHandle {
                cancel_tx,
                thread: Some(thread),
                stats,
            }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(SchedulerError::Audio(e))
            }
            Err(_) => {
                let _ = thread.join();
                Err(SchedulerError::WorkerExited)
            }
        }
    }

    fn run(
        &self,
        output: &mut dyn ToneOutput,
        cancel_rx: &Receiver<()>,
        stats: &Mutex<TickStats>,
    ) {
        // Deadlines are fixed multiples of the period from start, so time
        // spent inside a tick doesn't push later ticks back.
        let Some(mut next_tick) = next_deadline(Instant::now(), self.period) else {
            warn!(
                "Period {:?} is too long to schedule; waiting for shutdown",
                self.period
            );
            let _ = cancel_rx.recv();
            return;
        };
        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            match cancel_rx.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {
                    let outcome = self.tick(output);
                    stats.lock().record(outcome);
                    let now = Instant::now();
                    next_tick = match next_deadline(next_tick, self.period) {
                        Some(next) if next >= now => next,
                        _ => {
                            warn!("Tick overran its period; resynchronising");
                            match next_deadline(now, self.period) {
                                Some(next) => next,
                                None => {
                                    let _ = cancel_rx.recv();
                                    return;
                                }
                            }
                        }
                    };
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

/// `from + period`, or None when the result isn't representable as an
/// `Instant` on this platform.
fn next_deadline(from: Instant, period: Duration) -> Option<Instant> {
    from.checked_add(period)
}

/// Control side of a running scheduler.
///
/// Dropping the handle also stops the worker, but without waiting for it.
pub struct SchedulerHandle {
    cancel_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
    stats: Arc<Mutex<TickStats>>,
}

impl SchedulerHandle {
    pub fn stats(&self) -> TickStats {
        *self.stats.lock()
    }

    /// Cancel the pending wait, join the worker and return the final totals.
    pub fn stop(mut self) -> TickStats {
        let _ = self.cancel_tx.send(());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Scheduler thread panicked");
            }
        }
        self.stats()
    }
}
