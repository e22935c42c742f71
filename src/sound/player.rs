//! Tone player implementation using rodio.
//!
//! The rodio output stream is not `Send` on every platform, so it lives on a
//! dedicated audio thread. `RodioTonePlayer` only holds the sending half of a
//! queue into that thread and can be shared freely.

use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::ToneSequence;
use super::ToneEmitter;

/// Sample rate of the generated silence between tones.
const GAP_SAMPLE_RATE: u32 = 48_000;

/// Output gain applied to every tone.
const TONE_VOLUME: f32 = 0.25;

/// A tone player that synthesizes sine beeps with rodio.
///
/// Emission is non-blocking: sequences are queued to the audio thread and
/// played there in order.
pub struct RodioTonePlayer {
    tx: Sender<ToneSequence>,
}

impl RodioTonePlayer {
    /// Spawns the audio thread and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::PlaybackError` if the audio thread cannot be spawned.
    /// A missing output device is not an error here; it surfaces as
    /// `SoundError::DeviceNotAvailable` from later calls to `emit_tone_sequence`.
    pub fn new() -> Result<Self, SoundError> {
        let (tx, rx) = unbounded();

        thread::Builder::new()
            .name("tone-player".to_string())
            .spawn(move || run_audio_thread(rx))
            .map_err(|e| SoundError::PlaybackError(e.to_string()))?;

        debug!("Tone player thread started");
        Ok(Self { tx })
    }
}

impl ToneEmitter for RodioTonePlayer {
    fn emit_tone_sequence(&self, sequence: &ToneSequence) -> Result<(), SoundError> {
        self.tx.send(sequence.clone()).map_err(|_| {
            SoundError::DeviceNotAvailable("audio output thread has exited".to_string())
        })
    }
}

impl std::fmt::Debug for RodioTonePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioTonePlayer")
            .field("queued", &self.tx.len())
            .finish_non_exhaustive()
    }
}

/// Owns the output stream and plays queued sequences until every sender is gone.
fn run_audio_thread(rx: Receiver<ToneSequence>) {
    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            // Dropping `rx` makes every later emit report the missing device.
            let err = SoundError::StreamError(e.to_string());
            warn!(error = %err, suggestion = err.suggestion(), "Audio not available, tones disabled");
            return;
        }
    };
    debug!("Audio output stream initialized");

    for sequence in rx {
        let sink = match Sink::try_new(&stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                let err = SoundError::StreamError(e.to_string());
                warn!(
                    error = %err,
                    suggestion = err.suggestion(),
                    sequence = sequence.name(),
                    "Failed to create audio sink"
                );
                continue;
            }
        };

        for (i, tone) in sequence.tones().iter().enumerate() {
            if i > 0 {
                sink.append(Zero::<f32>::new(1, GAP_SAMPLE_RATE).take_duration(sequence.gap()));
            }
            sink.append(
                SineWave::new(tone.frequency_hz as f32)
                    .take_duration(tone.duration)
                    .amplify(TONE_VOLUME),
            );
        }

        debug!(sequence = sequence.name(), "Playing tone sequence");
        sink.sleep_until_end();
    }

    debug!("Tone player thread exiting");
}
