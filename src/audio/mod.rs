pub mod rodio_output;
pub mod tone;

use rodio::decoder::DecoderError;
use rodio::{PlayError, StreamError};
use thiserror::Error;
use tone::Tone;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("failed to open the default audio output: {0}")]
    Init(#[from] StreamError),

    #[error("failed to decode tone: {0}")]
    Decode(#[from] DecoderError),

    #[error("failed to create playback sink: {0}")]
    Sink(#[from] PlayError),
}

/// Something that can play a tone on an output device.
///
/// Implementations are created on the scheduler thread and never leave it, so
/// they don't need to be `Send`.
pub trait ToneOutput {
    /// Start playing `tone` at `volume`. Returns once playback has been
    /// handed to the device; it does not wait for the tone to finish.
    fn play(&mut self, tone: &Tone, volume: f32) -> Result<(), AudioError>;
}
