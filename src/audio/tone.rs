//! The keep-awake tone as an immutable WAV buffer.
//!
//! The buffer is synthesised once at startup and shared with the scheduler
//! thread, which hands a fresh reader over it to the decoder on every tick.

use crate::constants::{
    SILENT_TONE_HZ, TEST_TONE_HZ, TONE_AMPLITUDE, TONE_DURATION_SECS, TONE_FADE_MS,
    TONE_SAMPLE_RATE,
};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::f32::consts::PI;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToneError {
    #[error("{kind} is unavailable: {source}")]
    Unavailable {
        kind: ToneKind,
        #[source]
        source: hound::Error,
    },

    #[error("{0} is unavailable: buffer contains no samples")]
    Empty(ToneKind),
}

/// Which tone to play on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneKind {
    /// Near-inaudible 19kHz tone
    #[default]
    Silent,
    /// Audible 1kHz tone, for checking the setup works
    Test,
}

impl ToneKind {
    pub fn from_test_flag(test: bool) -> Self {
        if test {
            ToneKind::Test
        } else {
            ToneKind::Silent
        }
    }

    pub fn frequency_hz(self) -> f32 {
        match self {
            ToneKind::Silent => SILENT_TONE_HZ,
            ToneKind::Test => TEST_TONE_HZ,
        }
    }
}

impl fmt::Display for ToneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneKind::Silent => write!(f, "19kHz keep-awake tone"),
            ToneKind::Test => write!(f, "audible 1kHz test tone"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tone {
    kind: ToneKind,
    bytes: Arc<[u8]>,
    duration: Duration,
}

impl Tone {
    /// Build the WAV buffer for `kind`.
    pub fn synthesize(kind: ToneKind) -> Result<Self, ToneError> {
        let wav = render_sine(kind.frequency_hz())
            .map_err(|source| ToneError::Unavailable { kind, source })?;
        debug!("Synthesised {} ({} bytes)", kind, wav.len());
        Self::from_wav_bytes(kind, wav)
    }

    /// Wrap an existing WAV buffer, checking that it has a readable header and
    /// at least one sample.
    pub fn from_wav_bytes(kind: ToneKind, bytes: Vec<u8>) -> Result<Self, ToneError> {
        let (spec, frames) = {
            let reader = WavReader::new(Cursor::new(bytes.as_slice()))
                .map_err(|source| ToneError::Unavailable { kind, source })?;
            (reader.spec(), reader.duration())
        };
        if frames == 0 {
            return Err(ToneError::Empty(kind));
        }
        let duration = Duration::from_secs_f64(f64::from(frames) / f64::from(spec.sample_rate));

        Ok(Self {
            kind,
            bytes: bytes.into(),
            duration,
        })
    }

    pub fn kind(&self) -> ToneKind {
        self.kind
    }

    /// Shared handle to the encoded WAV bytes.
    pub fn bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Mono 16-bit sine with a linear fade at each end.
fn render_sine(frequency_hz: f32) -> Result<Vec<u8>, hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: TONE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let total = TONE_SAMPLE_RATE * TONE_DURATION_SECS;
    let fade = TONE_SAMPLE_RATE * TONE_FADE_MS / 1000;

    let mut cursor = Cursor::new(Vec::with_capacity(total as usize * 2 + 44));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for n in 0..total {
            let t = n as f32 / TONE_SAMPLE_RATE as f32;
            let edge = n.min(total - 1 - n);
            let gain = if edge < fade {
                edge as f32 / fade as f32
            } else {
                1.0
            };
            let sample = (2.0 * PI * frequency_hz * t).sin() * TONE_AMPLITUDE * gain;
            writer.write_sample((sample * f32::from(i16::MAX)) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_tone_is_three_seconds() {
        let tone = Tone::synthesize(ToneKind::Silent).unwrap();
        assert_eq!(tone.kind(), ToneKind::Silent);
        assert_eq!(tone.duration(), Duration::from_secs(u64::from(TONE_DURATION_SECS)));
    }

    #[test]
    fn test_synthesized_tone_is_valid_wav() {
        let tone = Tone::synthesize(ToneKind::Test).unwrap();
        let bytes = tone.bytes();
        let reader = WavReader::new(Cursor::new(&bytes[..])).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, TONE_SAMPLE_RATE);
    }

    #[test]
    fn test_fade_starts_and_ends_silent() {
        let tone = Tone::synthesize(ToneKind::Test).unwrap();
        let bytes = tone.bytes();
        let samples: Vec<i16> = WavReader::new(Cursor::new(&bytes[..]))
            .unwrap()
            .into_samples::<i16>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(samples[0], 0);
        assert_eq!(*samples.last().unwrap(), 0);
        assert!(samples.iter().any(|s| s.unsigned_abs() > 10_000));
    }

    #[test]
    fn test_garbage_bytes_are_unavailable() {
        let err = Tone::from_wav_bytes(ToneKind::Silent, b"not a wav file".to_vec()).unwrap_err();
        assert!(matches!(err, ToneError::Unavailable { kind: ToneKind::Silent, .. }));
    }

    #[test]
    fn test_test_flag_selects_audible_tone() {
        assert_eq!(ToneKind::from_test_flag(true), ToneKind::Test);
        assert_eq!(ToneKind::from_test_flag(false), ToneKind::Silent);
        assert_eq!(ToneKind::Test.frequency_hz(), TEST_TONE_HZ);
    }
}
