use super::tone::Tone;
use super::{AudioError, ToneOutput};
use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;

/// Plays tones on the system's default output device.
pub struct RodioOutput {
    // The device is released when the stream is dropped, so it must outlive
    // every sink created from the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        debug!("Opened default audio output");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl ToneOutput for RodioOutput {
    fn play(&mut self, tone: &Tone, volume: f32) -> Result<(), AudioError> {
        let source = Decoder::new(Cursor::new(tone.bytes()))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(volume);
        sink.append(source);
        // Let the tone finish on the mixer thread rather than blocking the tick.
        sink.detach();
        debug!("Playing {} for {:?}", tone.kind(), tone.duration());
        Ok(())
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        debug!("Closing audio output");
    }
}
