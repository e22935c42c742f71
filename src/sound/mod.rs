//! Tone signal emitter for break cues.
//!
//! This module provides:
//!
//! - The `ToneEmitter` capability used by the break cycle controller
//! - The two fixed cue sequences (ascending at break start, descending at break end)
//! - A rodio-backed player that synthesizes the beeps
//! - A mock emitter for tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   queue   ┌──────────────────┐
//! │ RodioTonePlayer  │──────────▶│  audio thread    │
//! │  (Send + Sync)   │           │  OutputStream +  │
//! └──────────────────┘           │  Sink per seq    │
//!                                └──────────────────┘
//! ```
//!
//! Playback is best-effort. Errors are returned to the caller, which logs
//! them and carries on with the cycle.

mod error;
mod player;
mod tone;

pub use error::SoundError;
pub use player::RodioTonePlayer;
pub use tone::{Tone, ToneSequence, TONE_GAP};

/// Trait for tone emission implementations.
///
/// Implementations must not block the caller for the length of the sequence.
pub trait ToneEmitter: Send + Sync {
    /// Plays an ordered list of tones with the sequence's fixed gap between them.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence could not be handed to the audio output.
    fn emit_tone_sequence(&self, sequence: &ToneSequence) -> Result<(), SoundError>;
}

/// Emitter used when the audio thread could not be started; every cue is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentToneEmitter;

impl ToneEmitter for SilentToneEmitter {
    fn emit_tone_sequence(&self, sequence: &ToneSequence) -> Result<(), SoundError> {
        tracing::debug!(sequence = sequence.name(), "Tone skipped, no audio output");
        Ok(())
    }
}

/// Mock tone emitter for testing.
#[derive(Debug, Default)]
pub struct MockToneEmitter {
    emitted: std::sync::Mutex<Vec<ToneSequence>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockToneEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn emit_count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }

    /// Names of the emitted sequences, in order.
    #[must_use]
    pub fn emitted_names(&self) -> Vec<&'static str> {
        self.emitted.lock().unwrap().iter().map(|s| s.name()).collect()
    }
}

impl ToneEmitter for MockToneEmitter {
    fn emit_tone_sequence(&self, sequence: &ToneSequence) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.emitted.lock().unwrap().push(sequence.clone());
        Ok(())
    }
}
