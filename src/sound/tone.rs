//! Tone sequences played at phase boundaries.

use std::time::Duration;

/// Silence inserted between consecutive tones of a sequence.
pub const TONE_GAP: Duration = Duration::from_millis(100);

/// A single beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    /// Frequency in hertz
    pub frequency_hz: u32,
    /// Length of the beep
    pub duration: Duration,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// An ordered list of tones played with a fixed gap between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneSequence {
    name: &'static str,
    tones: Vec<Tone>,
    gap: Duration,
}

impl ToneSequence {
    pub fn new(name: &'static str, tones: Vec<Tone>) -> Self {
        Self {
            name,
            tones,
            gap: TONE_GAP,
        }
    }

    /// Rising chime played when a break starts.
    pub fn ascending() -> Self {
        Self::new(
            "ascending",
            vec![Tone::new(800, 200), Tone::new(1000, 200), Tone::new(1200, 400)],
        )
    }

    /// Falling chime played when a break ends.
    pub fn descending() -> Self {
        Self::new(
            "descending",
            vec![Tone::new(1200, 200), Tone::new(1000, 200), Tone::new(800, 400)],
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }
}
