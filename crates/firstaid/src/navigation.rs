//! Top-level view routing.
//!
//! [`NavigationController`] is the single owner of session state: the active
//! view, the idle counter, the current language and content, the narrator,
//! and both flow engines. Every input is a method call that mutates that
//! state; [`NavigationController::snapshot`] is what a presentation layer
//! renders.
//!
//! Time is supplied by the caller as a monotonically increasing millisecond
//! clock through [`NavigationController::tick`]. The idle counter, step
//! countdown, compression rhythm and deferred narration all hang off it.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::{get_content, ContentBundle, FlowKind, Language, TextDirection};
use crate::flow::{AgeGroup, CprFlowEngine, CprRetreat, CprSnapshot, Retreat, StepFlowEngine, StepSnapshot};
use crate::narration::{SpeechCapability, Voice, VoiceNarrator};
use crate::schedule::Ticker;

const IDLE_TICK_MS: u64 = 1_000;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Category grid.
    #[default]
    Home,
    /// Bleeding guide.
    Bleeding,
    /// Burns guide.
    Burns,
    /// Wounds guide.
    Wounds,
    /// "Is the person conscious?"
    FaintingDecision,
    /// Fainting guide, conscious branch.
    FaintingConscious,
    /// Fainting guide, unconscious branch.
    FaintingUnconscious,
    /// CPR.
    Cpr,
    /// Kit inventory.
    Kit,
}

impl View {
    /// Every view.
    pub const ALL: [View; 9] = [
        View::Home,
        View::Bleeding,
        View::Burns,
        View::Wounds,
        View::FaintingDecision,
        View::FaintingConscious,
        View::FaintingUnconscious,
        View::Cpr,
        View::Kit,
    ];

    /// Stable name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Bleeding => "bleeding",
            Self::Burns => "burns",
            Self::Wounds => "wounds",
            Self::FaintingDecision => "fainting",
            Self::FaintingConscious => "fainting-conscious",
            Self::FaintingUnconscious => "fainting-unconscious",
            Self::Cpr => "cpr",
            Self::Kit => "kit",
        }
    }

    /// Look a view up by name. Unknown names map to [`View::Home`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| {
                warn!(view = wanted, "Unknown view, falling back to home");
                Self::Home
            })
    }

    /// The linear step list behind this view, if it is a linear guide.
    #[must_use]
    pub const fn linear_flow(self) -> Option<FlowKind> {
        match self {
            Self::Bleeding => Some(FlowKind::Bleeding),
            Self::Burns => Some(FlowKind::Burns),
            Self::Wounds => Some(FlowKind::Wounds),
            Self::FaintingConscious => Some(FlowKind::FaintingConscious),
            Self::FaintingUnconscious => Some(FlowKind::FaintingUnconscious),
            Self::Home | Self::FaintingDecision | Self::Cpr | Self::Kit => None,
        }
    }

    /// Whether the idle timeout may pull the user out of this view.
    #[must_use]
    pub const fn idle_exempt(self) -> bool {
        matches!(self, Self::Home | Self::Cpr)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Routing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavigationState {
    /// Screen currently shown.
    pub active_view: View,
    /// Seconds since the last qualifying input.
    pub idle_seconds: u32,
}

/// A global input signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse or pen press.
    PointerDown,
    /// Finger down.
    TouchStart,
    /// Any scroll.
    Scroll,
    /// Key press, by key code (`Space`) or character (`c`).
    KeyDown(String),
}

/// Result of a routing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The view changed to this one.
    Entered(View),
    /// Nothing changed at the view level.
    Unchanged,
    /// The request is not allowed from the current view.
    Blocked,
}

/// Everything a presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSnapshot {
    /// Screen to draw.
    pub view: View,
    /// Screen title in the current language.
    pub title: String,
    /// Seconds since the last input.
    pub idle_seconds: u32,
    /// Current language.
    pub language: Language,
    /// Text direction for the current language.
    pub direction: TextDirection,
    /// Whether narration is muted.
    pub muted: bool,
    /// Linear guide state, on guide screens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<StepSnapshot>,
    /// CPR state, on the CPR screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpr: Option<CprSnapshot>,
}

/// The application state machine.
#[derive(Debug)]
pub struct NavigationController<S> {
    state: NavigationState,
    language: Language,
    content: ContentBundle,
    narrator: VoiceNarrator<S>,
    guide: StepFlowEngine,
    cpr: CprFlowEngine,
    idle: Ticker,
    idle_timeout: u32,
    panic_keys: Vec<String>,
    now_ms: u64,
}

impl<S: SpeechCapability> NavigationController<S> {
    /// Create a controller on the home screen at time 0.
    pub fn new(config: &Config, capability: S, language: Language) -> Self {
        let narrator = VoiceNarrator::new(capability)
            .with_rate(config.narration.rate)
            .with_muted(config.narration.start_muted);
        let guide = StepFlowEngine::new(
            config.narration.guide_delay_ms,
            config.guide.default_timer_secs,
        );
        let cpr = CprFlowEngine::new(
            StepFlowEngine::new(config.narration.cpr_delay_ms, config.guide.default_timer_secs),
            config.cpr.rhythm_start_step,
            config.cpr.rhythm_interval_ms,
        );
        let mut idle = Ticker::new(IDLE_TICK_MS);
        idle.start(0);

        Self {
            state: NavigationState::default(),
            language,
            content: get_content(language),
            narrator,
            guide,
            cpr,
            idle,
            idle_timeout: config.navigation.idle_timeout_secs,
            panic_keys: config.navigation.panic_keys.clone(),
            now_ms: 0,
        }
    }

    /// Routing state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Active view.
    #[must_use]
    pub fn view(&self) -> View {
        self.state.active_view
    }

    /// Current language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Content for the current language.
    #[must_use]
    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    /// The narrator.
    #[must_use]
    pub fn narrator(&self) -> &VoiceNarrator<S> {
        &self.narrator
    }

    /// The linear guide engine.
    #[must_use]
    pub fn guide(&self) -> &StepFlowEngine {
        &self.guide
    }

    /// The CPR engine.
    #[must_use]
    pub fn cpr(&self) -> &CprFlowEngine {
        &self.cpr
    }

    /// Last time seen by [`tick`](Self::tick).
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    // === Routing ===

    /// Go to `view`. Blocked while in CPR: leaving CPR takes an explicit
    /// back, exit or home action.
    pub fn navigate_to(&mut self, view: View) -> Transition {
        let current = self.state.active_view;
        if current == View::Cpr && view != View::Cpr {
            debug!(target_view = %view, "Navigation out of CPR blocked");
            return Transition::Blocked;
        }
        if current == view {
            return Transition::Unchanged;
        }
        self.enter(view)
    }

    /// [`navigate_to`](Self::navigate_to) by name; unknown names mean home.
    pub fn navigate_to_named(&mut self, name: &str) -> Transition {
        self.navigate_to(View::from_name(name))
    }

    /// Return to the home screen from anywhere.
    pub fn go_home(&mut self) -> Transition {
        if self.state.active_view == View::Home {
            return Transition::Unchanged;
        }
        self.enter(View::Home)
    }

    /// Jump to CPR from anywhere. Does nothing if already there.
    pub fn trigger_panic(&mut self) -> Transition {
        if self.state.active_view == View::Cpr {
            return Transition::Unchanged;
        }
        warn!(from = %self.state.active_view, "Panic trigger, switching to CPR");
        self.enter(View::Cpr)
    }

    /// A physical emergency button press.
    pub fn external_panic(&mut self) -> Transition {
        self.state.idle_seconds = 0;
        self.trigger_panic()
    }

    /// Feed a global input event. Every event resets the idle counter; a
    /// panic key also triggers CPR.
    pub fn handle_input(&mut self, event: &InputEvent) -> Transition {
        self.state.idle_seconds = 0;
        match event {
            InputEvent::KeyDown(key) if self.is_panic_key(key) => self.trigger_panic(),
            _ => Transition::Unchanged,
        }
    }

    /// Whether `key` is configured as a panic key.
    #[must_use]
    pub fn is_panic_key(&self, key: &str) -> bool {
        self.panic_keys.iter().any(|k| !k.is_empty() && k == key)
    }

    // === Clock ===

    /// Advance the clock to `now_ms`, running every timer that fell due.
    pub fn tick(&mut self, now_ms: u64) -> Transition {
        self.now_ms = self.now_ms.max(now_ms);
        let mut outcome = Transition::Unchanged;
        for _ in 0..self.idle.elapsed(self.now_ms) {
            if let Transition::Entered(view) = self.tick_idle() {
                outcome = Transition::Entered(view);
            }
        }
        match self.state.active_view {
            View::Cpr => self.cpr.tick(self.now_ms),
            view if view.linear_flow().is_some() => self.guide.tick(self.now_ms),
            _ => {}
        }
        self.narrator.poll(self.now_ms);
        outcome
    }

    /// One second without input.
    pub fn tick_idle(&mut self) -> Transition {
        self.state.idle_seconds = self.state.idle_seconds.saturating_add(1);
        if self.state.idle_seconds < self.idle_timeout {
            return Transition::Unchanged;
        }
        self.state.idle_seconds = 0;
        if self.state.active_view.idle_exempt() {
            return Transition::Unchanged;
        }
        info!(from = %self.state.active_view, "Idle timeout, returning home");
        self.enter(View::Home)
    }

    // === In-view actions ===

    /// "Next" / "Finish". Finishing a linear guide returns home.
    pub fn next(&mut self) -> Transition {
        match self.state.active_view {
            View::Cpr => {
                self.cpr.advance(&mut self.narrator, self.now_ms);
                Transition::Unchanged
            }
            view if view.linear_flow().is_some() => {
                if self.guide.advance(&mut self.narrator) {
                    Transition::Unchanged
                } else {
                    debug!(flow = %view, "Guide finished");
                    self.go_home()
                }
            }
            _ => Transition::Unchanged,
        }
    }

    /// "Back". Steps backwards inside a flow, and leaves it from the start.
    pub fn back(&mut self) -> Transition {
        match self.state.active_view {
            View::Home => Transition::Unchanged,
            View::Cpr => match self.cpr.retreat(&mut self.narrator, self.now_ms) {
                CprRetreat::Moved | CprRetreat::ReturnedToAgeSelection => Transition::Unchanged,
                CprRetreat::AtAgeSelection => self.go_home(),
            },
            view if view.linear_flow().is_some() => match self.guide.retreat(&mut self.narrator) {
                Retreat::Moved => Transition::Unchanged,
                Retreat::AtFirst => self.go_home(),
            },
            // Decision and kit screens go straight home
            _ => self.go_home(),
        }
    }

    /// Choose the CPR age group. Only meaningful on the CPR screen.
    pub fn select_age(&mut self, age: AgeGroup) -> Transition {
        if self.state.active_view != View::Cpr {
            return Transition::Blocked;
        }
        let steps = self.content.steps(age.flow_kind()).clone();
        self.cpr
            .select_age(age, steps, &mut self.narrator, self.now_ms);
        Transition::Unchanged
    }

    /// Answer the fainting question.
    pub fn choose_fainting(&mut self, conscious: bool) -> Transition {
        if self.state.active_view != View::FaintingDecision {
            return Transition::Blocked;
        }
        self.enter(if conscious {
            View::FaintingConscious
        } else {
            View::FaintingUnconscious
        })
    }

    /// Mute or unmute narration. Unmuting inside a flow re-narrates the
    /// current step. Returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        match self.state.active_view {
            View::Cpr => self.cpr.toggle_mute(&mut self.narrator),
            view if view.linear_flow().is_some() => self.guide.toggle_mute(&mut self.narrator),
            _ => {
                if self.narrator.is_muted() {
                    self.narrator.unmute();
                } else {
                    self.narrator.mute();
                }
                self.narrator.is_muted()
            }
        }
    }

    /// Start or pause the current step's countdown.
    pub fn set_timer_running(&mut self, running: bool) {
        if self.state.active_view.linear_flow().is_some() {
            self.guide.set_timer_running(running, self.now_ms);
        }
    }

    /// Reset the current step's countdown.
    pub fn reset_timer(&mut self) {
        if self.state.active_view.linear_flow().is_some() {
            self.guide.reset_timer();
        }
    }

    // === Language and voices ===

    /// Switch language. Open flows keep their position and re-narrate the
    /// current step in the new language.
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        self.content = get_content(language);
        info!(%language, direction = language.direction().as_str(), "Language changed");

        match self.state.active_view {
            View::Cpr => {
                if let Some(age) = self.cpr.age() {
                    let steps = self.content.steps(age.flow_kind()).clone();
                    self.cpr.replace_steps(steps, &mut self.narrator, self.now_ms);
                }
            }
            view => {
                if let Some(kind) = view.linear_flow() {
                    let steps = self.content.steps(kind).clone();
                    self.guide.replace_steps(steps, &mut self.narrator);
                }
            }
        }
    }

    /// Flip between English and Arabic.
    pub fn toggle_language(&mut self) -> Language {
        self.set_language(self.language.toggled());
        self.language
    }

    /// The speech engine reported a new voice list.
    pub fn set_voices(&mut self, voices: Vec<Voice>) {
        self.narrator.set_voices(voices);
    }

    // === Rendering ===

    /// What to draw.
    #[must_use]
    pub fn snapshot(&self) -> AppSnapshot {
        let view = self.state.active_view;
        AppSnapshot {
            view,
            title: self.title(view),
            idle_seconds: self.state.idle_seconds,
            language: self.language,
            direction: self.language.direction(),
            muted: self.narrator.is_muted(),
            guide: view.linear_flow().and_then(|_| self.guide.snapshot()),
            cpr: (view == View::Cpr).then(|| self.cpr.snapshot()),
        }
    }

    fn title(&self, view: View) -> String {
        let home = &self.content.home;
        match view {
            View::Home => home.tap_help.clone(),
            View::FaintingDecision => home.fainting.clone(),
            View::Cpr => match self.cpr.age() {
                Some(age) => self.content.flow_title(age.flow_kind()),
                None => home.cpr.clone(),
            },
            View::Kit => home.kit.clone(),
            other => other
                .linear_flow()
                .map(|kind| self.content.flow_title(kind))
                .unwrap_or_default(),
        }
    }

    fn enter(&mut self, view: View) -> Transition {
        let previous = self.state.active_view;

        // Leaving a flow cancels its timers and narration
        if previous.linear_flow().is_some() {
            self.guide.stop(&mut self.narrator);
        }
        if previous == View::Cpr {
            self.cpr.stop(&mut self.narrator);
        }

        self.state.active_view = view;
        self.content = get_content(self.language);
        info!(
            from = %previous,
            to = %view,
            lang = %self.language,
            dir = self.language.direction().as_str(),
            "View changed"
        );

        if let Some(kind) = view.linear_flow() {
            let steps = self.content.steps(kind).clone();
            self.guide.start(steps, &mut self.narrator);
        }
        Transition::Entered(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::testing::RecordingSpeech;

    fn controller() -> NavigationController<RecordingSpeech> {
        let mut config = Config::default();
        config.narration.guide_delay_ms = 0;
        config.narration.cpr_delay_ms = 0;
        NavigationController::new(&config, RecordingSpeech::default(), Language::English)
    }

    fn spoken(nav: &NavigationController<RecordingSpeech>) -> Vec<String> {
        nav.narrator().capability().spoken()
    }

    #[test]
    fn test_starts_home() {
        let nav = controller();
        assert_eq!(nav.view(), View::Home);
        assert_eq!(nav.state().idle_seconds, 0);
        assert_eq!(nav.language(), Language::English);
    }

    #[test]
    fn test_view_names() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.name()), view);
        }
        assert_eq!(View::from_name("TRAINING"), View::Home);
        assert_eq!(View::from_name(" Burns "), View::Burns);
    }

    #[test]
    fn test_navigate_starts_flow_and_narrates() {
        let mut nav = controller();
        assert_eq!(nav.navigate_to(View::Bleeding), Transition::Entered(View::Bleeding));
        assert_eq!(nav.guide().index(), Some(0));
        let first = nav.content().bleeding_steps.get(0).unwrap().instruction.clone();
        assert_eq!(spoken(&nav), vec![first]);
    }

    #[test]
    fn test_navigate_to_same_view_is_unchanged() {
        let mut nav = controller();
        nav.navigate_to(View::Wounds);
        nav.next();
        assert_eq!(nav.navigate_to(View::Wounds), Transition::Unchanged);
        assert_eq!(nav.guide().index(), Some(1));
    }

    #[test]
    fn test_unknown_view_name_goes_home() {
        let mut nav = controller();
        nav.navigate_to(View::Kit);
        assert_eq!(nav.navigate_to_named("nowhere"), Transition::Entered(View::Home));
    }

    #[test]
    fn test_cannot_navigate_out_of_cpr() {
        let mut nav = controller();
        nav.navigate_to(View::Cpr);
        assert_eq!(nav.navigate_to(View::Kit), Transition::Blocked);
        assert_eq!(nav.view(), View::Cpr);

        assert_eq!(nav.go_home(), Transition::Entered(View::Home));
    }

    #[test]
    fn test_idle_timeout_from_guide() {
        let mut nav = controller();
        nav.navigate_to(View::Bleeding);
        for _ in 0..299 {
            assert_eq!(nav.tick_idle(), Transition::Unchanged);
        }
        assert_eq!(nav.view(), View::Bleeding);
        assert_eq!(nav.state().idle_seconds, 299);

        assert_eq!(nav.tick_idle(), Transition::Entered(View::Home));
        assert_eq!(nav.view(), View::Home);
        assert_eq!(nav.state().idle_seconds, 0);
        assert!(!nav.guide().is_active());
    }

    #[test]
    fn test_idle_timeout_never_leaves_cpr_or_home() {
        for view in [View::Cpr, View::Home] {
            let mut nav = controller();
            nav.navigate_to(view);
            for _ in 0..300 {
                nav.tick_idle();
            }
            assert_eq!(nav.view(), view);
            assert_eq!(nav.state().idle_seconds, 0);
        }
    }

    #[test]
    fn test_input_resets_idle_counter() {
        let mut nav = controller();
        nav.navigate_to(View::Kit);
        for _ in 0..250 {
            nav.tick_idle();
        }
        for event in [
            InputEvent::PointerDown,
            InputEvent::TouchStart,
            InputEvent::Scroll,
            InputEvent::KeyDown("a".to_string()),
        ] {
            nav.tick_idle();
            assert_eq!(nav.handle_input(&event), Transition::Unchanged);
            assert_eq!(nav.state().idle_seconds, 0);
        }
        for _ in 0..299 {
            nav.tick_idle();
        }
        assert_eq!(nav.view(), View::Kit);
    }

    #[test]
    fn test_clock_drives_idle_timeout() {
        let mut nav = controller();
        nav.navigate_to(View::Burns);
        assert_eq!(nav.tick(299_999), Transition::Unchanged);
        assert_eq!(nav.tick(300_000), Transition::Entered(View::Home));
    }

    #[test]
    fn test_panic_from_kit() {
        let mut nav = controller();
        nav.navigate_to(View::Kit);
        assert_eq!(nav.trigger_panic(), Transition::Entered(View::Cpr));
        assert_eq!(nav.view(), View::Cpr);
        assert_eq!(nav.trigger_panic(), Transition::Unchanged);
    }

    #[test]
    fn test_panic_keys() {
        for key in ["Space", "c", "C"] {
            let mut nav = controller();
            nav.navigate_to(View::Burns);
            nav.next();
            assert_eq!(
                nav.handle_input(&InputEvent::KeyDown(key.to_string())),
                Transition::Entered(View::Cpr)
            );
            assert!(!nav.guide().is_active());
        }

        let mut nav = controller();
        assert_eq!(
            nav.handle_input(&InputEvent::KeyDown("x".to_string())),
            Transition::Unchanged
        );
        assert_eq!(nav.external_panic(), Transition::Entered(View::Cpr));
    }

    #[test]
    fn test_next_on_last_step_finishes_guide() {
        let mut nav = controller();
        nav.navigate_to(View::Wounds);
        let len = nav.content().wounds_steps.len();
        for _ in 0..len - 1 {
            assert_eq!(nav.next(), Transition::Unchanged);
        }
        assert!(nav.guide().is_last());
        assert_eq!(nav.next(), Transition::Entered(View::Home));
    }

    #[test]
    fn test_back_from_first_step_goes_home() {
        let mut nav = controller();
        nav.navigate_to(View::Bleeding);
        nav.next();
        assert_eq!(nav.back(), Transition::Unchanged);
        assert_eq!(nav.guide().index(), Some(0));
        assert_eq!(nav.back(), Transition::Entered(View::Home));
    }

    #[test]
    fn test_fainting_decision() {
        let mut nav = controller();
        assert_eq!(nav.choose_fainting(true), Transition::Blocked);

        nav.navigate_to(View::FaintingDecision);
        assert!(nav.snapshot().guide.is_none());
        assert_eq!(
            nav.choose_fainting(false),
            Transition::Entered(View::FaintingUnconscious)
        );
        assert_eq!(
            nav.snapshot().title,
            nav.content().flow_title(FlowKind::FaintingUnconscious)
        );
        assert_eq!(nav.back(), Transition::Entered(View::Home));
    }

    #[test]
    fn test_cpr_back_chain() {
        let mut nav = controller();
        nav.navigate_to(View::Cpr);
        assert_eq!(nav.select_age(AgeGroup::Child), Transition::Unchanged);
        nav.next();

        assert_eq!(nav.back(), Transition::Unchanged);
        assert_eq!(nav.back(), Transition::Unchanged);
        assert_eq!(nav.cpr().age(), None);
        assert_eq!(nav.view(), View::Cpr);
        assert_eq!(nav.back(), Transition::Entered(View::Home));
    }

    #[test]
    fn test_select_age_outside_cpr_is_blocked() {
        let mut nav = controller();
        assert_eq!(nav.select_age(AgeGroup::Adult), Transition::Blocked);
    }

    #[test]
    fn test_cpr_rhythm_runs_from_compressions() {
        let mut nav = controller();
        nav.navigate_to(View::Cpr);
        nav.select_age(AgeGroup::Adult);
        for _ in 0..3 {
            nav.next();
        }
        assert!(nav.cpr().pulse().is_active());
        nav.tick(545);
        assert!(nav.cpr().pulse().is_on());

        nav.go_home();
        assert!(!nav.cpr().pulse().is_active());
    }

    #[test]
    fn test_leaving_flow_cancels_pending_narration() {
        let mut config = Config::default();
        config.narration.guide_delay_ms = 300;
        let mut nav = NavigationController::new(&config, RecordingSpeech::default(), Language::English);

        nav.navigate_to(View::Burns);
        assert!(nav.narrator().has_pending());
        nav.go_home();
        nav.tick(1_000);
        assert!(spoken(&nav).is_empty());
    }

    #[test]
    fn test_language_toggle_renarrates_current_step() {
        let mut nav = controller();
        nav.navigate_to(View::Burns);
        nav.next();
        let before = spoken(&nav).len();
        assert_eq!(nav.toggle_language(), Language::Arabic);

        let snapshot = nav.snapshot();
        assert_eq!(snapshot.direction, TextDirection::RightToLeft);
        let step = snapshot.guide.unwrap();
        assert_eq!(step.index, 1);
        assert_eq!(spoken(&nav).len(), before + 1);
        assert_eq!(
            spoken(&nav).last(),
            Some(&nav.content().burns_steps.get(1).unwrap().instruction)
        );
        let voice_tag = nav
            .narrator()
            .resolve(&step.step.instruction)
            .language_tag;
        assert_eq!(voice_tag, "ar");
    }

    #[test]
    fn test_language_toggle_in_cpr_keeps_age_and_index() {
        let mut nav = controller();
        nav.navigate_to(View::Cpr);
        nav.select_age(AgeGroup::Infant);
        nav.next();
        nav.set_language(Language::Arabic);

        let cpr = nav.snapshot().cpr.unwrap();
        assert_eq!(cpr.age, Some(AgeGroup::Infant));
        assert_eq!(cpr.step.unwrap().index, 1);
    }

    #[test]
    fn test_toggle_mute_in_guide() {
        let mut nav = controller();
        nav.navigate_to(View::Bleeding);
        assert!(nav.toggle_mute());
        nav.next();
        let before = spoken(&nav).len();
        assert!(!nav.toggle_mute());
        assert_eq!(spoken(&nav).len(), before + 1);
        assert_eq!(
            spoken(&nav).last(),
            Some(&nav.content().bleeding_steps.get(1).unwrap().instruction)
        );
    }

    #[test]
    fn test_mute_persists_across_flows() {
        let mut nav = controller();
        nav.toggle_mute();
        nav.navigate_to(View::Wounds);
        assert!(nav.snapshot().muted);
        assert!(spoken(&nav).is_empty());
    }

    #[test]
    fn test_timer_controls_through_controller() {
        let mut nav = controller();
        nav.navigate_to(View::Burns);
        nav.next();
        nav.set_timer_running(true);
        nav.tick(3_000);
        assert_eq!(nav.guide().timer().unwrap().remaining_seconds, 597);

        nav.set_timer_running(false);
        nav.tick(10_000);
        assert_eq!(nav.guide().timer().unwrap().remaining_seconds, 597);

        nav.reset_timer();
        assert_eq!(nav.guide().timer().unwrap().remaining_seconds, 600);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut nav = controller();
        nav.navigate_to(View::Cpr);
        let json = serde_json::to_string(&nav.snapshot()).unwrap();
        assert!(json.contains("\"view\":\"cpr\""));
        assert!(json.contains("\"direction\":\"ltr\""));
        assert!(!json.contains("\"guide\""));
    }

    #[test]
    fn test_set_voices() {
        let mut nav = controller();
        nav.set_voices(vec![Voice::new("Majed", "ar-SA")]);
        assert_eq!(nav.narrator().voices().len(), 1);
    }
}
