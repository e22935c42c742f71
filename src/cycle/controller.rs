//! Break cycle controller.
//!
//! This module provides the core of the application:
//! - State transitions (Stopped → Working → OnBreak → Working ...)
//! - Countdown with tokio::time::interval, one step per second
//! - Side effects at phase boundaries (overlay, tones, media toggle, animation)
//! - Cancellation at every one-second step
//!
//! All controller state sits behind one mutex. Every phase transition, and
//! `stop()`, runs its complete side-effect sequence while holding it, so a
//! stop racing a transition sees either the state before or the state after,
//! never a half-applied one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::media::MediaController;
use crate::sound::{ToneEmitter, ToneSequence};
use crate::types::{status_active_text, CycleDurations, CycleState, STATUS_STOPPED_TEXT};
use crate::ui::{UiDispatcher, UiUpdate};

// ============================================================================
// Signals
// ============================================================================

/// The signal emitters the controller drives at phase boundaries.
#[derive(Clone)]
pub struct Signals {
    pub tones: Arc<dyn ToneEmitter>,
    pub media: Arc<dyn MediaController>,
}

impl Signals {
    pub fn new(tones: Arc<dyn ToneEmitter>, media: Arc<dyn MediaController>) -> Self {
        Self { tones, media }
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signals").finish_non_exhaustive()
    }
}

// ============================================================================
// BreakCycleController
// ============================================================================

/// Mutable controller state.
#[derive(Debug, Default)]
struct CycleInner {
    state: CycleState,
    /// True while the controller owes a resume toggle.
    media_paused: bool,
    /// Bumped on every start; a loop with an older value is stale.
    generation: u64,
}

struct Shared {
    inner: Mutex<CycleInner>,
    durations: CycleDurations,
    signals: Signals,
    ui: UiDispatcher,
    active_loops: AtomicUsize,
}

/// Drives the work → break → work cycle.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct BreakCycleController {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl BreakCycleController {
    /// Creates a stopped controller.
    ///
    /// The timing loop is spawned on `runtime` when `start` is called.
    pub fn new(
        runtime: Handle,
        durations: CycleDurations,
        signals: Signals,
        ui: UiDispatcher,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(CycleInner::default()),
                durations,
                signals,
                ui,
                active_loops: AtomicUsize::new(0),
            }),
            runtime,
        }
    }

    /// Starts the cycle with a fresh work countdown.
    ///
    /// Returns `false` without doing anything if the cycle is already running.
    pub fn start(&self) -> bool {
        let work_secs = self.shared.durations.work_secs;

        let generation = {
            let mut inner = self.shared.lock();
            if inner.state.is_running() {
                debug!(state = %inner.state, "Start ignored, cycle already running");
                return false;
            }

            inner.generation += 1;
            inner.state = CycleState::Working(work_secs);
            self.shared.ui.send(UiUpdate::SetControlsRunning(true));
            self.shared
                .ui
                .send(UiUpdate::SetStatusText(status_active_text(work_secs)));
            inner.generation
        };

        let shared = Arc::clone(&self.shared);
        self.runtime.spawn(async move { shared.run_loop(generation).await });

        info!(generation, work_secs, "Eye care cycle started");
        true
    }

    /// Stops the cycle.
    ///
    /// If a break is in progress it ends immediately: the overlay is hidden,
    /// the animation stops and any owed media resume is sent. The timing loop
    /// notices at its next one-second step and exits.
    ///
    /// Returns `false` if the cycle was already stopped.
    pub fn stop(&self) -> bool {
        let mut inner = self.shared.lock();
        let previous = inner.state;
        if !previous.is_running() {
            debug!("Stop ignored, cycle not running");
            return false;
        }

        inner.state = CycleState::Stopped;
        if previous.is_on_break() {
            self.shared.ui.send(UiUpdate::HideOverlay);
            self.shared.ui.send(UiUpdate::StopEmojiAnimation);
            self.shared.resume_media_if_paused(&mut inner);
        }
        inner.media_paused = false;

        self.shared.ui.send(UiUpdate::SetControlsRunning(false));
        self.shared
            .ui
            .send(UiUpdate::SetStatusText(STATUS_STOPPED_TEXT.to_string()));

        info!(previous = %previous, "Eye care cycle stopped");
        true
    }

    /// Returns the current cycle state.
    pub fn state(&self) -> CycleState {
        self.shared.lock().state
    }

    /// Returns true if the controller believes it paused media and owes a resume.
    pub fn is_media_paused(&self) -> bool {
        self.shared.lock().media_paused
    }

    /// Number of timing loops currently alive.
    ///
    /// At most one loop acts at a time; a stale loop may linger for up to a
    /// second after a stop → start until it reaches its next step.
    pub fn active_loops(&self) -> usize {
        self.shared.active_loops.load(Ordering::SeqCst)
    }

}

impl std::fmt::Debug for BreakCycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreakCycleController")
            .field("state", &self.state())
            .field("durations", &self.shared.durations)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Timing loop
// ============================================================================

/// Keeps `active_loops` accurate even if the loop task is dropped mid-await.
struct ActiveLoopGuard<'a>(&'a AtomicUsize);

impl<'a> ActiveLoopGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for ActiveLoopGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CycleInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs work and break countdowns until the cycle is stopped or restarted.
    ///
    /// The first value of each phase is published by whoever enters the phase
    /// (`start`, `begin_break`, `finish_break`); the loop publishes the rest,
    /// one per tick.
    async fn run_loop(&self, generation: u64) {
        let _guard = ActiveLoopGuard::enter(&self.active_loops);

        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            for remaining in (1..self.durations.work_secs).rev() {
                if !self.publish_work_remaining(generation, remaining) {
                    return;
                }
                ticker.tick().await;
            }

            if !self.begin_break(generation) {
                return;
            }
            ticker.tick().await;

            for remaining in (1..self.durations.break_secs).rev() {
                if !self.publish_break_remaining(generation, remaining) {
                    return;
                }
                ticker.tick().await;
            }

            if !self.finish_break(generation) {
                return;
            }
        }
    }

    /// Locks the state if this loop is still the live one.
    fn lock_if_current(&self, generation: u64) -> Option<MutexGuard<'_, CycleInner>> {
        let inner = self.lock();
        if inner.generation == generation && inner.state.is_running() {
            Some(inner)
        } else {
            debug!(generation, current = inner.generation, "Timing loop exiting");
            None
        }
    }

    fn publish_work_remaining(&self, generation: u64, remaining: u32) -> bool {
        let Some(mut inner) = self.lock_if_current(generation) else {
            return false;
        };

        inner.state = CycleState::Working(remaining);
        self.ui
            .send(UiUpdate::SetStatusText(status_active_text(remaining)));
        debug!(remaining, "Work tick");
        true
    }

    fn publish_break_remaining(&self, generation: u64, remaining: u32) -> bool {
        let Some(mut inner) = self.lock_if_current(generation) else {
            return false;
        };

        inner.state = CycleState::OnBreak(remaining);
        self.ui.send(UiUpdate::SetCountdown(remaining));
        debug!(remaining, "Break tick");
        true
    }

    fn begin_break(&self, generation: u64) -> bool {
        let Some(mut inner) = self.lock_if_current(generation) else {
            return false;
        };

        let break_secs = self.durations.break_secs;
        inner.state = CycleState::OnBreak(break_secs);
        info!(break_secs, "Break started");

        self.ui.send(UiUpdate::SetCountdown(break_secs));
        self.ui.send(UiUpdate::ShowOverlay);
        self.emit_tones(&ToneSequence::ascending());
        inner.media_paused = self.toggle_media("pause");
        self.ui.send(UiUpdate::StartEmojiAnimation);
        true
    }

    fn finish_break(&self, generation: u64) -> bool {
        let Some(mut inner) = self.lock_if_current(generation) else {
            return false;
        };

        let work_secs = self.durations.work_secs;
        inner.state = CycleState::Working(work_secs);
        info!("Break finished");

        self.ui.send(UiUpdate::HideOverlay);
        self.ui.send(UiUpdate::StopEmojiAnimation);
        self.emit_tones(&ToneSequence::descending());
        self.resume_media_if_paused(&mut inner);
        self.ui
            .send(UiUpdate::SetStatusText(status_active_text(work_secs)));
        true
    }

    fn resume_media_if_paused(&self, inner: &mut CycleInner) {
        if inner.media_paused {
            self.toggle_media("resume");
            inner.media_paused = false;
        }
    }

    /// Plays a cue; failures are logged and otherwise ignored.
    fn emit_tones(&self, sequence: &ToneSequence) {
        if let Err(e) = self.signals.tones.emit_tone_sequence(sequence) {
            warn!(
                error = %e,
                suggestion = e.suggestion(),
                sequence = sequence.name(),
                "Failed to play tone sequence"
            );
        }
    }

    /// Sends a play/pause toggle and reports whether it was dispatched.
    fn toggle_media(&self, purpose: &'static str) -> bool {
        match self.signals.media.toggle_playback() {
            Ok(()) => {
                debug!(purpose, "Media toggle dispatched");
                true
            }
            Err(e) => {
                warn!(
                    error = %e,
                    suggestion = e.suggestion(),
                    purpose,
                    "Failed to toggle media playback"
                );
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MockMediaController;
    use crate::sound::MockToneEmitter;
    use crate::ui::Presenters;
    use crossbeam_channel::Receiver;

    struct Harness {
        controller: BreakCycleController,
        tones: Arc<MockToneEmitter>,
        media: Arc<MockMediaController>,
        updates: Receiver<UiUpdate>,
        presenters: Presenters,
    }

    impl Harness {
        fn new(durations: CycleDurations) -> Self {
            let tones = Arc::new(MockToneEmitter::new());
            let media = Arc::new(MockMediaController::new());
            let (tx, updates) = crossbeam_channel::unbounded();
            let controller = BreakCycleController::new(
                Handle::current(),
                durations,
                Signals::new(tones.clone(), media.clone()),
                UiDispatcher::new(tx),
            );
            Self {
                controller,
                tones,
                media,
                updates,
                presenters: Presenters::default(),
            }
        }

        fn settle(&mut self) -> Vec<UiUpdate> {
            let drained: Vec<UiUpdate> = self.updates.try_iter().collect();
            for update in &drained {
                self.presenters.apply(update.clone());
            }
            drained
        }
    }

    /// Sleeps to half a second past `secs` after the start instant.
    async fn advance_to(start: tokio::time::Instant, secs: u64) {
        tokio::time::sleep_until(start + Duration::from_millis(secs * 1000 + 500)).await;
    }

    mod start_stop_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_new_controller_is_stopped() {
            let harness = Harness::new(CycleDurations::default());
            assert_eq!(harness.controller.state(), CycleState::Stopped);
            assert!(!harness.controller.is_media_paused());
            assert_eq!(harness.controller.active_loops(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_sets_working_and_controls() {
            let mut harness = Harness::new(CycleDurations::default());

            assert!(harness.controller.start());
            assert_eq!(harness.controller.state(), CycleState::Working(1200));

            let updates = harness.settle();
            assert_eq!(updates[0], UiUpdate::SetControlsRunning(true));
            assert!(harness.presenters.status.stop_enabled());
            assert!(!harness.presenters.status.start_enabled());
            assert_eq!(
                harness.presenters.status.text(),
                "Eye Care Active\nNext break in: 20:00"
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_twice_spawns_one_loop() {
            let harness = Harness::new(CycleDurations::default());

            assert!(harness.controller.start());
            assert!(!harness.controller.start());
            tokio::time::sleep(Duration::from_millis(1500)).await;

            assert_eq!(harness.controller.active_loops(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_when_stopped_is_noop() {
            let mut harness = Harness::new(CycleDurations::default());

            assert!(!harness.controller.stop());
            assert!(harness.settle().is_empty());
            assert_eq!(harness.media.toggle_count(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_twice_is_idempotent() {
            let mut harness = Harness::new(CycleDurations::default());

            harness.controller.start();
            assert!(harness.controller.stop());
            harness.settle();
            assert!(!harness.controller.stop());

            assert!(harness.settle().is_empty());
            assert_eq!(harness.controller.state(), CycleState::Stopped);
        }

        #[tokio::test(start_paused = true)]
        async fn test_loop_exits_within_a_second_of_stop() {
            let harness = Harness::new(CycleDurations::default());
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 3).await;
            assert_eq!(harness.controller.active_loops(), 1);

            harness.controller.stop();
            advance_to(start, 4).await;
            assert_eq!(harness.controller.active_loops(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_rapid_restart_keeps_single_acting_loop() {
            let mut harness = Harness::new(CycleDurations::new(5, 3));
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 1).await;
            harness.controller.stop();
            harness.controller.start();
            harness.settle();

            // The stale loop exits at its next step; the new one continues alone.
            tokio::time::sleep_until(start + Duration::from_secs(3)).await;
            assert_eq!(harness.controller.active_loops(), 1);

            let statuses: Vec<String> = harness
                .settle()
                .into_iter()
                .filter_map(|u| match u {
                    UiUpdate::SetStatusText(text) => Some(text),
                    _ => None,
                })
                .collect();
            assert_eq!(
                statuses,
                vec!["Eye Care Active\nNext break in: 00:04"]
            );
        }
    }

    mod countdown_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_work_countdown_publishes_each_second() {
            let mut harness = Harness::new(CycleDurations::default());
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 2).await;

            assert_eq!(harness.controller.state(), CycleState::Working(1198));
            harness.settle();
            assert_eq!(
                harness.presenters.status.text(),
                "Eye Care Active\nNext break in: 19:58"
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_countdowns_decrease_monotonically() {
            let mut harness = Harness::new(CycleDurations::new(4, 3));
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 7).await;

            let mut work = Vec::new();
            let mut breaks = Vec::new();
            for update in harness.settle() {
                match update {
                    UiUpdate::SetStatusText(text) => work.push(text),
                    UiUpdate::SetCountdown(secs) => breaks.push(secs),
                    _ => {}
                }
            }

            assert_eq!(
                work,
                vec![
                    status_active_text(4),
                    status_active_text(3),
                    status_active_text(2),
                    status_active_text(1),
                    status_active_text(4),
                ]
            );
            assert_eq!(breaks, vec![3, 2, 1]);
        }
    }

    mod transition_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_break_starts_after_work_duration() {
            let mut harness = Harness::new(CycleDurations::default());
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 1199).await;
            assert_eq!(harness.controller.state(), CycleState::Working(1));
            harness.settle();
            assert!(!harness.presenters.overlay.is_visible());

            advance_to(start, 1200).await;
            assert_eq!(harness.controller.state(), CycleState::OnBreak(20));
            assert!(harness.controller.is_media_paused());
            assert_eq!(harness.tones.emitted_names(), vec!["ascending"]);
            assert_eq!(harness.media.toggle_count(), 1);

            harness.settle();
            assert!(harness.presenters.overlay.is_visible());
            assert!(harness.presenters.overlay.is_animating());
            assert_eq!(harness.presenters.overlay.countdown_text(), "20");
        }

        #[tokio::test(start_paused = true)]
        async fn test_full_cycle_returns_to_work() {
            let mut harness = Harness::new(CycleDurations::default());
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 1220).await;

            assert_eq!(harness.controller.state(), CycleState::Working(1200));
            assert!(!harness.controller.is_media_paused());
            assert_eq!(
                harness.tones.emitted_names(),
                vec!["ascending", "descending"]
            );
            assert_eq!(harness.media.toggle_count(), 2);

            harness.settle();
            assert!(!harness.presenters.overlay.is_visible());
            assert!(!harness.presenters.overlay.is_animating());
            assert_eq!(
                harness.presenters.status.text(),
                "Eye Care Active\nNext break in: 20:00"
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_cycle_repeats() {
            let harness = Harness::new(CycleDurations::new(3, 2));
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 10).await;

            assert_eq!(
                harness.tones.emitted_names(),
                vec!["ascending", "descending", "ascending", "descending"]
            );
            assert_eq!(harness.media.toggle_count(), 4);
            assert_eq!(harness.controller.state(), CycleState::Working(3));
        }
    }

    mod ordering_tests {
        use super::*;
        use crate::media::MediaError;
        use crate::sound::SoundError;

        #[derive(Debug, Clone, PartialEq, Eq)]
        enum Step {
            Ui(UiUpdate),
            Tone(&'static str),
            MediaToggle,
        }

        /// Tone emitter and media controller that interleave their calls with
        /// the UI updates queued before them.
        struct SequenceRecorder {
            updates: Receiver<UiUpdate>,
            steps: Mutex<Vec<Step>>,
        }

        impl SequenceRecorder {
            fn record(&self, step: Option<Step>) {
                let mut steps = self.steps.lock().unwrap();
                steps.extend(self.updates.try_iter().map(Step::Ui));
                steps.extend(step);
            }

            fn take(&self) -> Vec<Step> {
                self.record(None);
                std::mem::take(&mut *self.steps.lock().unwrap())
            }
        }

        impl ToneEmitter for SequenceRecorder {
            fn emit_tone_sequence(&self, sequence: &ToneSequence) -> Result<(), SoundError> {
                self.record(Some(Step::Tone(sequence.name())));
                Ok(())
            }
        }

        impl MediaController for SequenceRecorder {
            fn toggle_playback(&self) -> Result<(), MediaError> {
                self.record(Some(Step::MediaToggle));
                Ok(())
            }
        }

        fn recorded(durations: CycleDurations) -> (BreakCycleController, Arc<SequenceRecorder>) {
            let (tx, updates) = crossbeam_channel::unbounded();
            let recorder = Arc::new(SequenceRecorder {
                updates,
                steps: Mutex::new(Vec::new()),
            });
            let controller = BreakCycleController::new(
                Handle::current(),
                durations,
                Signals::new(recorder.clone(), recorder.clone()),
                UiDispatcher::new(tx),
            );
            (controller, recorder)
        }

        #[tokio::test(start_paused = true)]
        async fn test_break_start_order() {
            let (controller, recorder) = recorded(CycleDurations::new(2, 3));
            let start = tokio::time::Instant::now();

            controller.start();
            advance_to(start, 1).await;
            recorder.take();

            advance_to(start, 2).await;
            assert_eq!(
                recorder.take(),
                vec![
                    Step::Ui(UiUpdate::SetCountdown(3)),
                    Step::Ui(UiUpdate::ShowOverlay),
                    Step::Tone("ascending"),
                    Step::MediaToggle,
                    Step::Ui(UiUpdate::StartEmojiAnimation),
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_break_end_order() {
            let (controller, recorder) = recorded(CycleDurations::new(2, 3));
            let start = tokio::time::Instant::now();

            controller.start();
            advance_to(start, 4).await;
            recorder.take();

            advance_to(start, 5).await;
            assert_eq!(
                recorder.take(),
                vec![
                    Step::Ui(UiUpdate::HideOverlay),
                    Step::Ui(UiUpdate::StopEmojiAnimation),
                    Step::Tone("descending"),
                    Step::MediaToggle,
                    Step::Ui(UiUpdate::SetStatusText(status_active_text(2))),
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_during_break_order() {
            let (controller, recorder) = recorded(CycleDurations::new(2, 3));
            let start = tokio::time::Instant::now();

            controller.start();
            advance_to(start, 3).await;
            recorder.take();

            assert!(controller.stop());
            assert_eq!(
                recorder.take(),
                vec![
                    Step::Ui(UiUpdate::HideOverlay),
                    Step::Ui(UiUpdate::StopEmojiAnimation),
                    Step::MediaToggle,
                    Step::Ui(UiUpdate::SetControlsRunning(false)),
                    Step::Ui(UiUpdate::SetStatusText(STATUS_STOPPED_TEXT.to_string())),
                ]
            );
        }
    }

    mod failure_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_failed_pause_skips_resume() {
            let mut harness = Harness::new(CycleDurations::new(2, 2));
            harness.media.set_should_fail(true);
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 2).await;

            assert!(harness.controller.state().is_on_break());
            assert!(!harness.controller.is_media_paused());
            harness.settle();
            assert!(harness.presenters.overlay.is_visible());

            advance_to(start, 4).await;
            // Only the failed pause attempt; no resume is owed.
            assert_eq!(harness.media.toggle_count(), 1);
            assert_eq!(harness.controller.state(), CycleState::Working(2));
        }

        #[tokio::test(start_paused = true)]
        async fn test_tone_failure_does_not_block_cycle() {
            let mut harness = Harness::new(CycleDurations::new(2, 2));
            harness.tones.set_should_fail(true);
            let start = tokio::time::Instant::now();

            harness.controller.start();
            advance_to(start, 2).await;
            harness.settle();
            assert!(harness.presenters.overlay.is_visible());
            assert!(harness.controller.is_media_paused());

            advance_to(start, 4).await;
            harness.settle();
            assert!(!harness.presenters.overlay.is_visible());
            assert_eq!(harness.media.toggle_count(), 2);
        }
    }
}
