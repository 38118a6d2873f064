//! Interactive kiosk session on a terminal.
//!
//! Each stdin line is one touch or key event. A 100 ms interval drives the
//! controller's clock, voices are listed on a blocking task, and the screen
//! is re-rendered to stdout whenever it changes.

use std::fmt;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::{ContentBundle, Language};
use crate::error::Result;
use crate::flow::{AgeGroup, StepSnapshot};
use crate::kit::{KitInventory, KitItem, KitStatus, KitStore};
use crate::narration::{system, SilentSpeech, SpeechCapability};
use crate::navigation::{AppSnapshot, InputEvent, NavigationController, Transition, View};
use crate::storage::Storage;

/// Event loop period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// What to do with the current step's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Start counting down.
    Start,
    /// Pause.
    Pause,
    /// Back to full length, paused.
    Reset,
}

/// One line of kiosk input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskCommand {
    /// Tap a category tile.
    Tap(View),
    /// Next / Finish.
    Next,
    /// Back.
    Back,
    /// The CPR screen's exit button.
    Exit,
    /// Straight to the home screen.
    Home,
    /// External emergency button.
    Panic,
    /// A key press.
    Key(String),
    /// Pick a CPR age group.
    Age(AgeGroup),
    /// Answer the fainting question.
    Conscious(bool),
    /// Toggle narration.
    Mute,
    /// Toggle the language.
    Language,
    /// Countdown control.
    Timer(TimerAction),
    /// Scroll gesture.
    Scroll,
    /// End the session.
    Quit,
}

impl KioskCommand {
    /// Parse one input line. Blank or unrecognised lines yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let arg = words.next();

        let command = match (verb.as_str(), arg) {
            ("tap" | "go", Some(view)) => Self::Tap(View::from_name(view)),
            ("next" | "n", _) => Self::Next,
            ("back" | "b", _) => Self::Back,
            ("exit", _) => Self::Exit,
            ("home", _) => Self::Home,
            ("panic", _) => Self::Panic,
            ("key", Some(code)) => Self::Key(code.to_string()),
            ("age", Some(name)) => Self::Age(AgeGroup::from_name(name)?),
            ("conscious" | "yes", _) => Self::Conscious(true),
            ("unconscious" | "no", _) => Self::Conscious(false),
            ("mute", _) => Self::Mute,
            ("lang" | "language", _) => Self::Language,
            ("timer", Some("start")) => Self::Timer(TimerAction::Start),
            ("timer", Some("pause")) => Self::Timer(TimerAction::Pause),
            ("timer", Some("reset")) => Self::Timer(TimerAction::Reset),
            ("scroll", _) => Self::Scroll,
            ("quit" | "q", _) => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// A controller plus the optional kit inventory it shows.
#[derive(Debug)]
pub struct Kiosk<S, K> {
    nav: NavigationController<S>,
    kit: Option<KitInventory<K>>,
}

impl<S: SpeechCapability, K: KitStore> Kiosk<S, K> {
    /// Wrap a controller. Without an inventory the kit screen is empty.
    pub fn new(nav: NavigationController<S>, kit: Option<KitInventory<K>>) -> Self {
        Self { nav, kit }
    }

    /// The controller.
    #[must_use]
    pub fn navigation(&self) -> &NavigationController<S> {
        &self.nav
    }

    /// Mutable access to the controller.
    pub fn navigation_mut(&mut self) -> &mut NavigationController<S> {
        &mut self.nav
    }

    /// Kit items, if an inventory is attached.
    #[must_use]
    pub fn kit_items(&self) -> &[KitItem] {
        match &self.kit {
            Some(kit) => kit.items(),
            None => &[],
        }
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn apply(&mut self, command: KioskCommand) -> bool {
        debug!(?command, "Kiosk input");
        let transition = match command {
            KioskCommand::Quit => return false,
            KioskCommand::Key(code) => self.nav.handle_input(&InputEvent::KeyDown(code)),
            KioskCommand::Scroll => self.nav.handle_input(&InputEvent::Scroll),
            KioskCommand::Panic => self.nav.external_panic(),
            other => {
                self.nav.handle_input(&InputEvent::TouchStart);
                self.apply_touch(other)
            }
        };
        if let Transition::Blocked = transition {
            debug!(view = %self.nav.view(), "Input ignored on this screen");
        }
        true
    }

    /// Advance the clock.
    pub fn tick(&mut self, now_ms: u64) {
        self.nav.tick(now_ms);
    }

    /// Current screen as text.
    #[must_use]
    pub fn render(&self) -> String {
        let snapshot = self.nav.snapshot();
        Screen {
            snapshot: &snapshot,
            content: self.nav.content(),
            kit: self.kit_items(),
        }
        .to_string()
    }

    fn apply_touch(&mut self, command: KioskCommand) -> Transition {
        match command {
            KioskCommand::Tap(view) => self.nav.navigate_to(view),
            KioskCommand::Next => self.nav.next(),
            KioskCommand::Back => self.nav.back(),
            KioskCommand::Exit | KioskCommand::Home => self.nav.go_home(),
            KioskCommand::Age(age) => self.nav.select_age(age),
            KioskCommand::Conscious(conscious) => self.nav.choose_fainting(conscious),
            KioskCommand::Mute => {
                self.nav.toggle_mute();
                Transition::Unchanged
            }
            KioskCommand::Language => {
                self.nav.toggle_language();
                self.relocalize_kit();
                Transition::Unchanged
            }
            KioskCommand::Timer(action) => {
                match action {
                    TimerAction::Start => self.nav.set_timer_running(true),
                    TimerAction::Pause => self.nav.set_timer_running(false),
                    TimerAction::Reset => self.nav.reset_timer(),
                }
                Transition::Unchanged
            }
            KioskCommand::Key(_) | KioskCommand::Scroll | KioskCommand::Panic | KioskCommand::Quit => {
                Transition::Unchanged
            }
        }
    }

    fn relocalize_kit(&mut self) {
        if let Some(kit) = self.kit.as_mut() {
            if let Err(err) = kit.relocalize(&self.nav.content().default_kit) {
                warn!(error = %err, "Failed to save re-localized kit");
            }
        }
    }
}

/// One screen of the kiosk, rendered as plain text through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// What to draw.
    pub snapshot: &'a AppSnapshot,
    /// Strings for the snapshot's language.
    pub content: &'a ContentBundle,
    /// Kit items for the kit screen.
    pub kit: &'a [KitItem],
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let ui = &self.content.ui;
        writeln!(f, "== {} ==", snapshot.title)?;

        match snapshot.view {
            View::Home => self.write_home(f)?,
            View::FaintingDecision => {
                writeln!(f, "{}", ui.fainting_question)?;
                writeln!(f, "  [conscious] {}", ui.conscious)?;
                writeln!(f, "  [unconscious] {}", ui.unconscious)?;
            }
            View::Cpr => self.write_cpr(f)?,
            View::Kit => self.write_kit(f)?,
            _ => {
                if let Some(step) = &snapshot.guide {
                    self.write_step(f, step)?;
                }
            }
        }

        let voice = if snapshot.muted { &ui.muted } else { &ui.unmuted };
        write!(
            f,
            "-- {voice} | {} ({}) --",
            snapshot.language,
            snapshot.direction.as_str()
        )
    }
}

impl Screen<'_> {
    fn write_home(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let home = &self.content.home;
        for (view, label) in [
            (View::Cpr, &home.cpr),
            (View::Bleeding, &home.bleeding),
            (View::Burns, &home.burns),
            (View::Wounds, &home.wounds),
            (View::FaintingDecision, &home.fainting),
            (View::Kit, &home.kit),
        ] {
            writeln!(f, "  [{}] {label}", view.name())?;
        }
        writeln!(f, "{}", self.content.ui.safety_disclaimer)
    }

    fn write_cpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ui = &self.content.ui;
        writeln!(f, "{}", ui.ensure_safety)?;
        let session = self
            .snapshot
            .cpr
            .as_ref()
            .and_then(|cpr| cpr.step.as_ref().map(|step| (cpr, step)));
        match session {
            Some((cpr, step)) => {
                self.write_step(f, step)?;
                if cpr.rhythm_active {
                    writeln!(f, "{}", ui.rhythm_guide)?;
                }
                writeln!(f, "{}", ui.continue_cpr)?;
            }
            None => {
                writeln!(f, "{}", ui.select_age)?;
                for (age, label, years) in [
                    (AgeGroup::Adult, &ui.adult, &ui.adult_years),
                    (AgeGroup::Child, &ui.child, &ui.child_years),
                    (AgeGroup::Infant, &ui.infant, &ui.infant_years),
                ] {
                    writeln!(f, "  [age {}] {label} ({years})", age.name())?;
                }
            }
        }
        writeln!(f, "[exit] {}", ui.exit_emergency)
    }

    fn write_kit(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ui = &self.content.ui;
        for item in self.kit {
            let status = match item.status {
                KitStatus::Available => &ui.available,
                KitStatus::Low => &ui.low,
                KitStatus::Expired => &ui.expired,
            };
            writeln!(
                f,
                "  {:>3}  {} x{} ({status})",
                item.id, item.name, item.quantity
            )?;
        }
        Ok(())
    }

    fn write_step(&self, f: &mut fmt::Formatter<'_>, step: &StepSnapshot) -> fmt::Result {
        let ui = &self.content.ui;
        writeln!(f, "{} {} {} {}", ui.step, step.index + 1, ui.of, step.total)?;
        writeln!(f, "{}", step.step.title)?;
        writeln!(f, "{}", step.step.instruction)?;
        if let Some(warning) = &step.step.warning {
            writeln!(f, "! {warning}")?;
        }
        if let Some(timer) = step.timer {
            let action = if timer.running { &ui.pause } else { &ui.start };
            writeln!(
                f,
                "{}: {:02}:{:02} [timer {action}]",
                ui.cooling_timer,
                timer.remaining_seconds / 60,
                timer.remaining_seconds % 60,
            )?;
        }
        let forward = if step.is_last { &ui.finish } else { &ui.next };
        writeln!(f, "[back] {}  [next] {forward}", ui.back)
    }
}

/// Pick the speech backend for a session.
#[must_use]
pub fn speech_capability(config: &Config) -> Box<dyn SpeechCapability> {
    if !config.narration.enabled {
        info!("Narration disabled by configuration");
        return Box::new(SilentSpeech);
    }
    match system::SystemSpeech::new() {
        Ok(speech) => Box::new(speech),
        Err(err) => {
            warn!(error = %err, "No speech engine, running silently");
            Box::new(SilentSpeech)
        }
    }
}

/// Run an interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or stdin fails.
pub fn run(config: &Config, language: Language) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let nav = NavigationController::new(config, speech_capability(config), language);
    let kit = match Storage::open(config.database_path()) {
        Ok(storage) => Some(KitInventory::load(storage, &nav.content().default_kit)),
        Err(err) => {
            warn!(error = %err, "Kit storage unavailable, kit screen disabled");
            None
        }
    };

    runtime.block_on(run_session(Kiosk::new(nav, kit)))
}

async fn run_session<S: SpeechCapability, K: KitStore>(mut kiosk: Kiosk<S, K>) -> Result<()> {
    let started = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut voices_task = tokio::task::spawn_blocking(system::list_voices);
    let mut voices_pending = true;

    info!(platform = system::platform_name(), "Kiosk session started");
    let mut last_frame = kiosk.render();
    println!("{last_frame}");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }

            _ = interval.tick() => {
                let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                kiosk.tick(now_ms);
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match KioskCommand::parse(&line) {
                    Some(command) => {
                        if !kiosk.apply(command) {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!(input = %line.trim(), "Unrecognised command"),
                }
            }

            joined = &mut voices_task, if voices_pending => {
                voices_pending = false;
                match joined {
                    Ok(Ok(voices)) => {
                        info!(count = voices.len(), "Voices loaded");
                        kiosk.navigation_mut().set_voices(voices);
                    }
                    Ok(Err(err)) => debug!(error = %err, "No voice list"),
                    Err(err) => warn!(error = %err, "Voice listing task failed"),
                }
            }
        }

        let frame = kiosk.render();
        if frame != last_frame {
            println!("\n{frame}");
            last_frame = frame;
        }
    }

    info!("Kiosk session ended");
    Ok(())
}
