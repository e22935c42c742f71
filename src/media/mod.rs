//! Media playback signal emitter.
//!
//! Breaks try to pause whatever is playing and resume it afterwards. There is
//! no portable way to ask the OS what is playing, so both directions are the
//! same play/pause toggle and the caller keeps track of whether it owes a
//! resume.
//!
//! # Error Handling
//!
//! All errors in this module are recoverable. The break cycle logs them and
//! continues without the pause.

pub mod error;
pub mod keys;

pub use error::MediaError;
pub use keys::SystemMediaController;

/// Capability to send a single play/pause toggle.
pub trait MediaController: Send + Sync {
    /// Sends one play/pause toggle.
    ///
    /// `Ok` means the signal was dispatched, not that playback changed.
    fn toggle_playback(&self) -> Result<(), MediaError>;
}

/// Mock media controller for testing.
#[derive(Debug, Default)]
pub struct MockMediaController {
    toggle_calls: std::sync::atomic::AtomicUsize,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockMediaController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of toggles attempted, including failed ones.
    #[must_use]
    pub fn toggle_count(&self) -> usize {
        self.toggle_calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl MediaController for MockMediaController {
    fn toggle_playback(&self) -> Result<(), MediaError> {
        self.toggle_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MediaError::DispatchFailed("simulated failure".to_string()));
        }
        Ok(())
    }
}
