//! Status window presenter: the remaining-time label and start/stop controls.

use crate::types::{status_active_text, WORK_DURATION_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPresenter {
    text: String,
    running: bool,
}

impl Default for StatusPresenter {
    fn default() -> Self {
        Self {
            text: status_active_text(WORK_DURATION_SECS),
            running: false,
        }
    }
}

impl StatusPresenter {
    pub fn set_status_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// While running, stop is enabled and start disabled; the reverse otherwise.
    pub fn set_controls_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn start_enabled(&self) -> bool {
        !self.running
    }

    pub fn stop_enabled(&self) -> bool {
        self.running
    }
}
