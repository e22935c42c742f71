//! User interface for the eye-care cycle.
//!
//! This module provides:
//! - `UiUpdate`: commands the timing loop sends to the UI thread
//! - `UiDispatcher`: the sending end of the FIFO update queue
//! - `OverlayPresenter` / `StatusPresenter`: UI-thread state for both windows
//! - `EyeCareApp`: the eframe application that renders them
//!
//! # Architecture
//!
//! The timing loop never touches presenter state. It enqueues `UiUpdate`
//! commands through a crossbeam channel and wakes the UI; the UI thread
//! drains the channel at the start of every frame and applies the updates
//! in order.
//!
//! ```ignore
//! use eyecare::ui::{UiDispatcher, UiUpdate};
//! use crossbeam_channel::unbounded;
//!
//! let (tx, rx) = unbounded();
//! let dispatcher = UiDispatcher::new(tx).with_waker(move || ctx.request_repaint());
//!
//! // From the timing loop
//! dispatcher.send(UiUpdate::SetCountdown(20));
//! ```

pub mod app;
pub mod constants;
pub mod overlay;
pub mod status;

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

pub use app::{run_gui, EyeCareApp};
pub use overlay::{EmojiCycle, OverlayPresenter};
pub use status::StatusPresenter;

// ============================================================================
// UiUpdate
// ============================================================================

/// A presenter mutation marshaled onto the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the status window text
    SetStatusText(String),
    /// Enable stop / disable start (true) or the reverse (false)
    SetControlsRunning(bool),
    /// Show the break overlay
    ShowOverlay,
    /// Hide the break overlay
    HideOverlay,
    /// Set the overlay countdown in seconds
    SetCountdown(u32),
    /// Start the emoji animation ticker
    StartEmojiAnimation,
    /// Stop the emoji animation ticker
    StopEmojiAnimation,
}

// ============================================================================
// UiDispatcher
// ============================================================================

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sends `UiUpdate`s to the UI thread and wakes it.
#[derive(Clone)]
pub struct UiDispatcher {
    tx: Sender<UiUpdate>,
    waker: Option<Waker>,
}

impl UiDispatcher {
    pub fn new(tx: Sender<UiUpdate>) -> Self {
        Self { tx, waker: None }
    }

    /// Sets a callback invoked after every send so the UI thread redraws.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    /// Enqueues an update.
    ///
    /// If the UI has already gone away the update is dropped.
    pub fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            tracing::debug!("UI update channel disconnected, update dropped");
            return;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

impl std::fmt::Debug for UiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("pending", &self.tx.len())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

// ============================================================================
// Presenters
// ============================================================================

/// Both presenters, owned by the UI thread.
#[derive(Debug, Default)]
pub struct Presenters {
    pub overlay: OverlayPresenter,
    pub status: StatusPresenter,
}

impl Presenters {
    /// Applies one update.
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::SetStatusText(text) => self.status.set_status_text(text),
            UiUpdate::SetControlsRunning(running) => self.status.set_controls_running(running),
            UiUpdate::ShowOverlay => self.overlay.show(),
            UiUpdate::HideOverlay => self.overlay.hide(),
            UiUpdate::SetCountdown(seconds) => self.overlay.set_countdown_text(seconds),
            UiUpdate::StartEmojiAnimation => self.overlay.start_emoji_animation(),
            UiUpdate::StopEmojiAnimation => self.overlay.stop_emoji_animation(),
        }
    }

    /// Applies every pending update in FIFO order.
    ///
    /// Returns the number of updates applied.
    pub fn drain(&mut self, rx: &Receiver<UiUpdate>) -> usize {
        let mut applied = 0;
        for update in rx.try_iter() {
            tracing::trace!(?update, "Applying UI update");
            self.apply(update);
            applied += 1;
        }
        applied
    }
}

// ============================================================================
// Tests
// ============================================================================
