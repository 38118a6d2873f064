//! Linear step flow.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::content::{GuideStep, StepList};
use crate::narration::{SpeechCapability, VoiceNarrator};
use crate::schedule::Ticker;

/// Countdown period.
const TIMER_TICK_MS: u64 = 1_000;

/// Countdown state for a step that has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    /// Seconds left.
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking.
    pub running: bool,
}

impl TimerState {
    fn paused(seconds: u32) -> Self {
        Self {
            remaining_seconds: seconds,
            running: false,
        }
    }
}

/// Outcome of [`StepFlowEngine::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved to the previous step.
    Moved,
    /// Already on the first step; the caller decides what "back" means.
    AtFirst,
}

/// What the presentation layer needs to draw the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    /// Zero-based index.
    pub index: usize,
    /// Number of steps in the flow.
    pub total: usize,
    /// The step itself.
    pub step: GuideStep,
    /// Whether this is the first step.
    pub is_first: bool,
    /// Whether this is the last step.
    pub is_last: bool,
    /// Countdown, when the step has one.
    pub timer: Option<TimerState>,
}

#[derive(Debug, Clone)]
struct FlowSession {
    steps: StepList,
    index: usize,
    timer: Option<TimerState>,
}

impl FlowSession {
    fn current(&self) -> &GuideStep {
        debug_assert!(self.index < self.steps.len(), "cursor past end of step list");
        &self.steps[self.index]
    }
}

/// Cursor, countdown and narration trigger for one linear flow at a time.
#[derive(Debug, Clone)]
pub struct StepFlowEngine {
    session: Option<FlowSession>,
    countdown: Ticker,
    narration_delay_ms: u64,
    default_timer_secs: u32,
}

impl StepFlowEngine {
    /// Create an engine with no session.
    ///
    /// `narration_delay_ms` defers each step's narration so the view can
    /// render first. `default_timer_secs` is what a timer reset falls back to
    /// when the step's own length is unknown.
    #[must_use]
    pub fn new(narration_delay_ms: u64, default_timer_secs: u32) -> Self {
        Self {
            session: None,
            countdown: Ticker::new(TIMER_TICK_MS),
            narration_delay_ms,
            default_timer_secs,
        }
    }

    /// Begin a session at step 0, replacing any current one.
    pub fn start<S: SpeechCapability>(
        &mut self,
        steps: StepList,
        narrator: &mut VoiceNarrator<S>,
    ) {
        debug!(steps = steps.len(), "Starting flow session");
        self.countdown.cancel();
        let timer = steps
            .get(0)
            .and_then(|s| s.timer_seconds)
            .map(TimerState::paused);
        self.session = Some(FlowSession {
            steps,
            index: 0,
            timer,
        });
        self.narrate_current(narrator);
    }

    /// End the session, stopping the countdown and any narration.
    pub fn stop<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) {
        if self.session.take().is_some() {
            debug!("Flow session ended");
        }
        self.countdown.cancel();
        narrator.cancel();
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current index, if a session is open.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.index)
    }

    /// Current step, if a session is open.
    #[must_use]
    pub fn current_step(&self) -> Option<&GuideStep> {
        self.session.as_ref().map(FlowSession::current)
    }

    /// Whether the cursor is on the first step. `false` with no session.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.index == 0)
    }

    /// Whether the cursor is on the last step. `false` with no session.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.index == s.steps.last_index())
    }

    /// Move to the next step. Returns `false` (and does nothing) on the last
    /// step or with no session.
    pub fn advance<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.index >= session.steps.last_index() {
            return false;
        }
        session.index += 1;
        self.enter_step(narrator);
        true
    }

    /// Move to the previous step.
    pub fn retreat<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) -> Retreat {
        let Some(session) = self.session.as_mut() else {
            return Retreat::AtFirst;
        };
        if session.index == 0 {
            return Retreat::AtFirst;
        }
        session.index -= 1;
        self.enter_step(narrator);
        Retreat::Moved
    }

    /// Mute, or unmute and immediately narrate the current step. Returns
    /// the new muted state.
    pub fn toggle_mute<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) -> bool {
        if narrator.is_muted() {
            narrator.unmute();
            if let Some(step) = self.current_step() {
                narrator.speak(&step.instruction);
            }
            false
        } else {
            narrator.mute();
            true
        }
    }

    /// Swap in a re-localized step list and narrate the current step again.
    ///
    /// The cursor is kept (clamped if the new list is shorter). A running
    /// countdown survives when the step at the cursor still has a timer.
    pub fn replace_steps<S: SpeechCapability>(
        &mut self,
        steps: StepList,
        narrator: &mut VoiceNarrator<S>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let index = session.index.min(steps.last_index());
        let has_timer = steps.get(index).and_then(|s| s.timer_seconds);
        let timer = match (index == session.index, session.timer, has_timer) {
            (true, Some(state), Some(_)) => Some(state),
            (_, _, seconds) => seconds.map(TimerState::paused),
        };
        if !timer.is_some_and(|t| t.running) {
            self.countdown.cancel();
        }
        session.steps = steps;
        session.index = index;
        session.timer = timer;
        self.narrate_current(narrator);
    }

    /// Countdown state for the current step.
    #[must_use]
    pub fn timer(&self) -> Option<TimerState> {
        self.session.as_ref().and_then(|s| s.timer)
    }

    /// One second of countdown. Stops at zero; never advances the step.
    pub fn tick_timer(&mut self) {
        let Some(timer) = self.session.as_mut().and_then(|s| s.timer.as_mut()) else {
            return;
        };
        if !timer.running {
            return;
        }
        timer.remaining_seconds = timer.remaining_seconds.saturating_sub(1);
        trace!(remaining = timer.remaining_seconds, "Countdown tick");
        if timer.remaining_seconds == 0 {
            timer.running = false;
            self.countdown.cancel();
            info!("Countdown finished");
        }
    }

    /// Start or pause the countdown. Starting a finished countdown does
    /// nothing.
    pub fn set_timer_running(&mut self, running: bool, now_ms: u64) {
        let Some(timer) = self.session.as_mut().and_then(|s| s.timer.as_mut()) else {
            return;
        };
        if running && timer.remaining_seconds == 0 {
            return;
        }
        timer.running = running;
        if running {
            self.countdown.start(now_ms);
        } else {
            self.countdown.cancel();
        }
        debug!(running, remaining = timer.remaining_seconds, "Countdown toggled");
    }

    /// Restore the countdown to the step's length and pause it.
    pub fn reset_timer(&mut self) {
        let fallback = self.default_timer_secs;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let seconds = session.current().timer_seconds.unwrap_or(fallback);
        if let Some(timer) = session.timer.as_mut() {
            *timer = TimerState::paused(seconds);
            self.countdown.cancel();
        }
    }

    /// Drive the countdown from the event loop clock.
    pub fn tick(&mut self, now_ms: u64) {
        for _ in 0..self.countdown.elapsed(now_ms) {
            self.tick_timer();
        }
    }

    /// Snapshot of the current step.
    #[must_use]
    pub fn snapshot(&self) -> Option<StepSnapshot> {
        self.session.as_ref().map(|s| StepSnapshot {
            index: s.index,
            total: s.steps.len(),
            step: s.current().clone(),
            is_first: s.index == 0,
            is_last: s.index == s.steps.last_index(),
            timer: s.timer,
        })
    }

    fn enter_step<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) {
        self.countdown.cancel();
        if let Some(session) = self.session.as_mut() {
            session.timer = session.current().timer_seconds.map(TimerState::paused);
            debug!(index = session.index, "Entered step");
        }
        self.narrate_current(narrator);
    }

    fn narrate_current<S: SpeechCapability>(&self, narrator: &mut VoiceNarrator<S>) {
        if let Some(step) = self.current_step() {
            narrator.speak_after(&step.instruction, self.narration_delay_ms);
        }
    }
}
