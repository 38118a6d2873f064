//! CPR flow: age gate, step cursor and compression rhythm.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, trace};

use super::step::{Retreat, StepFlowEngine, StepSnapshot};
use crate::content::{FlowKind, StepList};
use crate::narration::{SpeechCapability, VoiceNarrator};
use crate::schedule::Ticker;

/// Patient age bracket. "Not chosen yet" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    /// Over 8 years.
    Adult,
    /// 1 to 8 years.
    Child,
    /// Under 1 year.
    Infant,
}

impl AgeGroup {
    /// Every age group.
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Adult, AgeGroup::Child, AgeGroup::Infant];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Child => "child",
            Self::Infant => "infant",
        }
    }

    /// Parse a name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|age| age.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The step list this age group uses.
    #[must_use]
    pub const fn flow_kind(self) -> FlowKind {
        match self {
            Self::Adult => FlowKind::CprAdult,
            Self::Child => FlowKind::CprChild,
            Self::Infant => FlowKind::CprInfant,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-cadence on/off metronome for chest compressions.
#[derive(Debug, Clone)]
pub struct RhythmPulse {
    ticker: Ticker,
    on: bool,
    toggles: u64,
}

impl RhythmPulse {
    /// An inactive pulse that toggles every `interval_ms` once activated.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            ticker: Ticker::new(interval_ms),
            on: false,
            toggles: 0,
        }
    }

    /// Start toggling. Does nothing if already running.
    pub fn activate(&mut self, now_ms: u64) {
        if !self.ticker.is_active() {
            debug!(interval_ms = self.ticker.period_ms(), "Rhythm pulse started");
            self.ticker.start(now_ms);
        }
    }

    /// Stop toggling and switch off.
    pub fn deactivate(&mut self) {
        if self.ticker.is_active() {
            debug!("Rhythm pulse stopped");
        }
        self.ticker.cancel();
        self.on = false;
    }

    /// Whether the pulse is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ticker.is_active()
    }

    /// Current phase.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Total toggles since creation.
    #[must_use]
    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    /// Apply every toggle due by `now_ms`. Returns how many fired.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        let fired = self.ticker.elapsed(now_ms);
        if fired % 2 == 1 {
            self.on = !self.on;
        }
        self.toggles += fired;
        if fired > 0 {
            trace!(fired, on = self.on, "Rhythm pulse");
        }
        fired
    }
}

/// Outcome of [`CprFlowEngine::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CprRetreat {
    /// Moved to the previous step.
    Moved,
    /// Was on the first step; the age choice was cleared.
    ReturnedToAgeSelection,
    /// Already on the age selection screen; the caller may leave CPR.
    AtAgeSelection,
}

/// What the presentation layer needs to draw the CPR view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CprSnapshot {
    /// Chosen age group, if any.
    pub age: Option<AgeGroup>,
    /// Current step once an age group is chosen.
    pub step: Option<StepSnapshot>,
    /// Whether the metronome is running.
    pub rhythm_active: bool,
    /// Metronome phase.
    pub rhythm_on: bool,
}

/// CPR guidance.
#[derive(Debug, Clone)]
pub struct CprFlowEngine {
    age: Option<AgeGroup>,
    flow: StepFlowEngine,
    pulse: RhythmPulse,
    rhythm_start_step: usize,
}

impl CprFlowEngine {
    /// Wrap a step engine. The pulse runs from `rhythm_start_step` onward.
    #[must_use]
    pub fn new(flow: StepFlowEngine, rhythm_start_step: usize, rhythm_interval_ms: u64) -> Self {
        Self {
            age: None,
            flow,
            pulse: RhythmPulse::new(rhythm_interval_ms),
            rhythm_start_step,
        }
    }

    /// Chosen age group.
    #[must_use]
    pub fn age(&self) -> Option<AgeGroup> {
        self.age
    }

    /// The underlying step engine.
    #[must_use]
    pub fn flow(&self) -> &StepFlowEngine {
        &self.flow
    }

    /// The compression metronome.
    #[must_use]
    pub fn pulse(&self) -> &RhythmPulse {
        &self.pulse
    }

    /// Choose an age group and start its steps. Choosing again restarts.
    pub fn select_age<S: SpeechCapability>(
        &mut self,
        age: AgeGroup,
        steps: StepList,
        narrator: &mut VoiceNarrator<S>,
        now_ms: u64,
    ) {
        info!(%age, "CPR age group selected");
        self.age = Some(age);
        self.flow.start(steps, narrator);
        self.update_pulse(now_ms);
    }

    /// Next step.
    pub fn advance<S: SpeechCapability>(
        &mut self,
        narrator: &mut VoiceNarrator<S>,
        now_ms: u64,
    ) -> bool {
        let moved = self.flow.advance(narrator);
        self.update_pulse(now_ms);
        moved
    }

    /// Previous step, or back to the age gate from step 0.
    pub fn retreat<S: SpeechCapability>(
        &mut self,
        narrator: &mut VoiceNarrator<S>,
        now_ms: u64,
    ) -> CprRetreat {
        if self.age.is_none() {
            return CprRetreat::AtAgeSelection;
        }
        match self.flow.retreat(narrator) {
            Retreat::Moved => {
                self.update_pulse(now_ms);
                CprRetreat::Moved
            }
            Retreat::AtFirst => {
                debug!("Back to age selection");
                self.clear(narrator);
                CprRetreat::ReturnedToAgeSelection
            }
        }
    }

    /// Leave CPR entirely.
    pub fn stop<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) {
        self.clear(narrator);
    }

    /// Mute toggle, same semantics as the linear engine.
    pub fn toggle_mute<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) -> bool {
        self.flow.toggle_mute(narrator)
    }

    /// Swap in re-localized steps for the chosen age group.
    pub fn replace_steps<S: SpeechCapability>(
        &mut self,
        steps: StepList,
        narrator: &mut VoiceNarrator<S>,
        now_ms: u64,
    ) {
        if self.age.is_some() {
            self.flow.replace_steps(steps, narrator);
            self.update_pulse(now_ms);
        }
    }

    /// Drive timers from the event loop clock.
    pub fn tick(&mut self, now_ms: u64) {
        self.flow.tick(now_ms);
        self.pulse.tick(now_ms);
    }

    /// Snapshot of the CPR view.
    #[must_use]
    pub fn snapshot(&self) -> CprSnapshot {
        CprSnapshot {
            age: self.age,
            step: self.flow.snapshot(),
            rhythm_active: self.pulse.is_active(),
            rhythm_on: self.pulse.is_on(),
        }
    }

    fn clear<S: SpeechCapability>(&mut self, narrator: &mut VoiceNarrator<S>) {
        self.age = None;
        self.flow.stop(narrator);
        self.pulse.deactivate();
    }

    fn update_pulse(&mut self, now_ms: u64) {
        let compressions = self
            .flow
            .index()
            .is_some_and(|index| index >= self.rhythm_start_step);
        if compressions {
            self.pulse.activate(now_ms);
        } else {
            self.pulse.deactivate();
        }
    }
}
