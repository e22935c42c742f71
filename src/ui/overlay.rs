//! Break overlay presenter.
//!
//! Holds everything the full-screen break surface displays. Rendering lives
//! in `app.rs`; this type is plain state so it can be driven without a window.

use std::time::{Duration, Instant};

use super::constants::{BREAK_MESSAGE, EMOJI_FRAME_INTERVAL, EMOJI_GLYPHS};
use crate::types::BREAK_DURATION_SECS;

// ============================================================================
// EmojiCycle
// ============================================================================

/// Ordered face glyphs with a wrapping cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiCycle {
    glyphs: &'static [&'static str],
    index: usize,
}

impl Default for EmojiCycle {
    fn default() -> Self {
        Self::new(EMOJI_GLYPHS)
    }
}

impl EmojiCycle {
    /// # Panics
    ///
    /// Panics if `glyphs` is empty.
    pub fn new(glyphs: &'static [&'static str]) -> Self {
        assert!(!glyphs.is_empty(), "emoji cycle needs at least one glyph");
        Self { glyphs, index: 0 }
    }

    pub fn current(&self) -> &'static str {
        self.glyphs[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next glyph, wrapping at the end.
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % self.glyphs.len();
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

// ============================================================================
// OverlayPresenter
// ============================================================================

#[derive(Debug)]
pub struct OverlayPresenter {
    visible: bool,
    countdown: u32,
    emoji: EmojiCycle,
    animating: bool,
    /// When the next frame is due; `None` means "advance on next poll".
    next_frame_at: Option<Instant>,
}

impl Default for OverlayPresenter {
    fn default() -> Self {
        Self {
            visible: false,
            countdown: BREAK_DURATION_SECS,
            emoji: EmojiCycle::default(),
            animating: false,
            next_frame_at: None,
        }
    }
}

impl OverlayPresenter {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_countdown_text(&mut self, seconds: u32) {
        self.countdown = seconds;
    }

    pub fn countdown_text(&self) -> String {
        self.countdown.to_string()
    }

    pub fn message(&self) -> &'static str {
        BREAK_MESSAGE
    }

    pub fn emoji(&self) -> &'static str {
        self.emoji.current()
    }

    pub fn start_emoji_animation(&mut self) {
        self.animating = true;
        self.next_frame_at = None;
    }

    /// Stops the ticker; no further frame is scheduled.
    pub fn stop_emoji_animation(&mut self) {
        self.animating = false;
        self.next_frame_at = None;
        self.emoji.reset();
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advances the glyph if a frame is due.
    ///
    /// Returns the delay until the next frame while the animation is active,
    /// or `None` once it has been stopped.
    pub fn poll_animation(&mut self, now: Instant) -> Option<Duration> {
        if !self.animating {
            return None;
        }

        let due = self.next_frame_at.is_none_or(|at| now >= at);
        if due {
            self.emoji.advance();
            self.next_frame_at = Some(now + EMOJI_FRAME_INTERVAL);
        }

        self.next_frame_at
            .map(|at| at.saturating_duration_since(now))
    }
}
