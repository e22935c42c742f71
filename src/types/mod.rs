//! Core data types for the eye-care break cycle.
//!
//! This module defines:
//! - The cycle state (`Stopped` / `Working` / `OnBreak`)
//! - The fixed work and break durations
//! - Text formatting shared by the controller and the presenters

use std::fmt;

// ============================================================================
// Durations
// ============================================================================

/// Length of a work interval in seconds (20 minutes).
pub const WORK_DURATION_SECS: u32 = 20 * 60;

/// Length of a break in seconds.
pub const BREAK_DURATION_SECS: u32 = 20;

/// Work and break durations used by a controller.
///
/// Fixed for the lifetime of the controller that receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDurations {
    /// Work interval in seconds
    pub work_secs: u32,
    /// Break interval in seconds
    pub break_secs: u32,
}

impl Default for CycleDurations {
    fn default() -> Self {
        Self {
            work_secs: WORK_DURATION_SECS,
            break_secs: BREAK_DURATION_SECS,
        }
    }
}

impl CycleDurations {
    /// Creates durations with the given work and break lengths.
    ///
    /// Zero-length phases are raised to one second so the loop always ticks.
    pub fn new(work_secs: u32, break_secs: u32) -> Self {
        Self {
            work_secs: work_secs.max(1),
            break_secs: break_secs.max(1),
        }
    }
}

// ============================================================================
// CycleState
// ============================================================================

/// Represents the current phase of the break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    /// No timing loop is running
    #[default]
    Stopped,
    /// Counting down to the next break
    Working(u32),
    /// Break overlay is up, counting down to the end of the break
    OnBreak(u32),
}

impl CycleState {
    pub fn is_running(&self) -> bool {
        !matches!(self, CycleState::Stopped)
    }

    pub fn is_on_break(&self) -> bool {
        matches!(self, CycleState::OnBreak(_))
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleState::Stopped => write!(f, "stopped"),
            CycleState::Working(secs) => write!(f, "working ({})", format_mmss(*secs)),
            CycleState::OnBreak(secs) => write!(f, "on break ({secs}s)"),
        }
    }
}

// ============================================================================
// Text
// ============================================================================

/// Status text shown once the cycle has been stopped.
pub const STATUS_STOPPED_TEXT: &str = "Eye Care Stopped";

/// Formats seconds as `MM:SS`.
pub fn format_mmss(seconds: u32) -> String {
    let (mins, secs) = (seconds / 60, seconds % 60);
    format!("{mins:02}:{secs:02}")
}

/// Status text shown while counting down to the next break.
pub fn status_active_text(remaining_seconds: u32) -> String {
    format!(
        "Eye Care Active\nNext break in: {}",
        format_mmss(remaining_seconds)
    )
}

// ============================================================================
// Tests
// ============================================================================
