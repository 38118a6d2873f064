//! Text-to-speech narration of step instructions.
//!
//! [`VoiceNarrator`] owns the single "currently speaking" slot. Every request
//! cancels whatever is playing before it is issued, so at most one utterance
//! is ever alive and nothing is queued. Requests may be deferred by a short
//! delay; a deferred request is held in one pending slot that the next
//! request overwrites, and is released by [`VoiceNarrator::poll`].
//!
//! Speech failures are logged and swallowed: a missing engine means silence,
//! never an error for the caller.

pub mod system;

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default speech rate, a little slower than the engine default.
pub const DEFAULT_RATE: f32 = 0.9;

/// Language tag used for Latin-script text.
pub const ENGLISH_TAG: &str = "en-US";

/// Language tag used for Arabic text when no Arabic voice is installed.
pub const ARABIC_FALLBACK_TAG: &str = "ar";

/// Writing system of a piece of text, as far as narration cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Contains at least one character from the Arabic block.
    Arabic,
    /// Everything else.
    Latin,
}

/// Classify `text` by script.
///
/// Any code point in U+0600..=U+06FF makes the whole text Arabic.
#[must_use]
pub fn detect_script(text: &str) -> Script {
    if text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
        Script::Arabic
    } else {
        Script::Latin
    }
}

/// An installed voice as reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific voice name.
    pub name: String,
    /// Language tag, e.g. `ar-SA` or `en-us`.
    pub lang: String,
}

impl Voice {
    /// Create a voice description.
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn is_arabic(&self) -> bool {
        self.lang
            .split(['-', '_'])
            .next()
            .is_some_and(|primary| primary.eq_ignore_ascii_case("ar"))
    }
}

/// One fully resolved speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Language tag to speak it in.
    pub language_tag: String,
    /// Specific voice, when one matched.
    pub voice: Option<Voice>,
    /// Rate multiplier.
    pub rate: f32,
}

/// Errors a speech capability can report.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No usable speech engine on this system.
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),

    /// The engine refused or failed an utterance.
    #[error("utterance failed: {0}")]
    Failed(String),
}

/// A speech engine.
///
/// `speak` must return without waiting for playback to finish.
pub trait SpeechCapability: fmt::Debug {
    /// Voices currently installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be queried.
    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Start speaking.
    ///
    /// # Errors
    ///
    /// Returns an error if the utterance could not be started.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop anything currently playing. Must be safe to call when idle.
    fn cancel(&mut self);
}

impl<T: SpeechCapability + ?Sized> SpeechCapability for Box<T> {
    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        (**self).list_voices()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        (**self).speak(utterance)
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }
}

/// A capability that never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl SpeechCapability for SilentSpeech {
    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(Vec::new())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        trace!(text = %utterance.text, "Silent narration");
        Ok(())
    }

    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    due_ms: u64,
    text: String,
}

/// Process-wide narrator.
#[derive(Debug)]
pub struct VoiceNarrator<S> {
    capability: S,
    voices: Vec<Voice>,
    rate: f32,
    muted: bool,
    now_ms: u64,
    pending: Option<Pending>,
}

impl<S: SpeechCapability> VoiceNarrator<S> {
    /// Wrap a capability. Voices start empty; see [`set_voices`](Self::set_voices).
    pub fn new(capability: S) -> Self {
        Self {
            capability,
            voices: Vec::new(),
            rate: DEFAULT_RATE,
            muted: false,
            now_ms: 0,
            pending: None,
        }
    }

    /// Override the speech rate.
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Start muted.
    #[must_use]
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// The wrapped capability.
    pub fn capability(&self) -> &S {
        &self.capability
    }

    /// Mutable access to the wrapped capability.
    pub fn capability_mut(&mut self) -> &mut S {
        &mut self.capability
    }

    /// Replace the known voice list. Called whenever the engine reports a
    /// change; speaking before the first call simply uses language tags.
    pub fn set_voices(&mut self, voices: Vec<Voice>) {
        debug!(count = voices.len(), "Voices changed");
        self.voices = voices;
    }

    /// Voices known so far.
    #[must_use]
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Whether speech is suppressed.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether a deferred request is waiting for [`poll`](Self::poll).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel current speech and drop any deferred request.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.capability.cancel();
    }

    /// Cancel and suppress all speech until [`unmute`](Self::unmute).
    pub fn mute(&mut self) {
        debug!("Narration muted");
        self.muted = true;
        self.cancel();
    }

    /// Allow speech again. Nothing is replayed.
    pub fn unmute(&mut self) {
        debug!("Narration unmuted");
        self.muted = false;
    }

    /// Speak `text` now, superseding anything in flight or pending.
    pub fn speak(&mut self, text: &str) {
        self.pending = None;
        if self.muted {
            trace!("Muted, not speaking");
            return;
        }
        if text.trim().is_empty() {
            return;
        }

        self.capability.cancel();
        let utterance = self.resolve(text);
        debug!(lang = %utterance.language_tag, voice = ?utterance.voice.as_ref().map(|v| &v.name), "Speaking");
        if let Err(err) = self.capability.speak(&utterance) {
            warn!(error = %err, "Narration failed, continuing silently");
        }
    }

    /// Speak `text` once `delay_ms` has passed on the narrator's clock.
    ///
    /// Current speech is cancelled immediately; a previous deferred request
    /// is replaced.
    pub fn speak_after(&mut self, text: &str, delay_ms: u64) {
        if self.muted {
            self.pending = None;
            return;
        }
        if delay_ms == 0 {
            self.speak(text);
            return;
        }
        self.capability.cancel();
        self.pending = Some(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            text: text.to_string(),
        });
    }

    /// Advance the narrator's clock and release a due deferred request.
    pub fn poll(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.due_ms <= self.now_ms)
        {
            if let Some(pending) = self.pending.take() {
                self.speak(&pending.text);
            }
        }
    }

    /// Build the utterance for `text`: language tag and voice follow the
    /// detected script.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Utterance {
        let (language_tag, voice) = match detect_script(text) {
            Script::Arabic => match self.voices.iter().find(|v| v.is_arabic()) {
                Some(voice) => (voice.lang.clone(), Some(voice.clone())),
                None => (ARABIC_FALLBACK_TAG.to_string(), None),
            },
            Script::Latin => (ENGLISH_TAG.to_string(), None),
        };
        Utterance {
            text: text.to_string(),
            language_tag,
            voice,
            rate: self.rate,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingSpeech, SpeechEvent};
    use super::*;

    fn narrator() -> VoiceNarrator<RecordingSpeech> {
        VoiceNarrator::new(RecordingSpeech::default())
    }

    #[test]
    fn test_detect_script() {
        assert_eq!(detect_script("Apply pressure"), Script::Latin);
        assert_eq!(detect_script("اضغط على الجرح"), Script::Arabic);
        assert_eq!(detect_script("CPR الإنعاش"), Script::Arabic);
        assert_eq!(detect_script(""), Script::Latin);
        // Range edges
        assert_eq!(detect_script("\u{0600}"), Script::Arabic);
        assert_eq!(detect_script("\u{06FF}"), Script::Arabic);
        assert_eq!(detect_script("\u{0700}"), Script::Latin);
        assert_eq!(detect_script("\u{05FF}"), Script::Latin);
    }

    #[test]
    fn test_second_speak_cancels_first() {
        let mut narrator = narrator();
        narrator.speak("A");
        narrator.speak("B");

        let events = &narrator.capability().events;
        let last_speak = events
            .iter()
            .rposition(|e| matches!(e, SpeechEvent::Speak(_)))
            .unwrap();
        assert_eq!(events[last_speak - 1], SpeechEvent::Cancel);
        assert_eq!(narrator.capability().last_spoken().as_deref(), Some("B"));
    }

    #[test]
    fn test_deferred_requests_collapse_to_latest() {
        let mut narrator = narrator();
        narrator.speak_after("A", 300);
        narrator.speak_after("B", 300);
        narrator.poll(299);
        assert!(narrator.capability().spoken().is_empty());
        assert!(narrator.has_pending());

        narrator.poll(300);
        assert_eq!(narrator.capability().spoken(), vec!["B"]);
        assert!(!narrator.has_pending());
    }

    #[test]
    fn test_deferred_request_cancels_current_speech_immediately() {
        let mut narrator = narrator();
        narrator.speak("A");
        narrator.capability_mut().clear();
        narrator.speak_after("B", 100);
        assert_eq!(narrator.capability().events, vec![SpeechEvent::Cancel]);
    }

    #[test]
    fn test_zero_delay_speaks_now() {
        let mut narrator = narrator();
        narrator.speak_after("now", 0);
        assert_eq!(narrator.capability().spoken(), vec!["now"]);
    }

    #[test]
    fn test_mute_suppresses_and_unmute_does_not_replay() {
        let mut narrator = narrator();
        narrator.speak_after("pending", 100);
        narrator.mute();
        assert!(narrator.is_muted());
        assert!(!narrator.has_pending());

        narrator.speak("ignored");
        narrator.speak_after("ignored too", 10);
        narrator.poll(1_000);
        assert!(narrator.capability().spoken().is_empty());

        narrator.unmute();
        narrator.poll(2_000);
        assert!(narrator.capability().spoken().is_empty());

        narrator.speak("heard");
        assert_eq!(narrator.capability().spoken(), vec!["heard"]);
    }

    #[test]
    fn test_arabic_voice_selection() {
        let mut narrator = narrator();
        let utterance = narrator.resolve("اتصل بالطوارئ");
        assert_eq!(utterance.language_tag, ARABIC_FALLBACK_TAG);
        assert!(utterance.voice.is_none());

        let voices = narrator.capability().list_voices().unwrap();
        narrator.set_voices(voices);
        let utterance = narrator.resolve("اتصل بالطوارئ");
        assert_eq!(utterance.language_tag, "ar-SA");
        assert_eq!(utterance.voice.unwrap().name, "Majed");
    }

    #[test]
    fn test_latin_uses_english_tag() {
        let mut narrator = narrator().with_rate(1.2);
        narrator.set_voices(vec![Voice::new("Majed", "ar-SA")]);
        let utterance = narrator.resolve("Call for help");
        assert_eq!(utterance.language_tag, ENGLISH_TAG);
        assert!(utterance.voice.is_none());
        assert!((utterance.rate - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_voice_matching_uses_primary_subtag() {
        assert!(Voice::new("x", "ar").is_arabic());
        assert!(Voice::new("x", "AR_eg").is_arabic());
        assert!(!Voice::new("x", "mar").is_arabic());
        assert!(!Voice::new("x", "en-US").is_arabic());
    }

    #[test]
    fn test_failed_utterance_is_swallowed() {
        let mut narrator = VoiceNarrator::new(RecordingSpeech {
            fail: true,
            ..RecordingSpeech::default()
        });
        narrator.speak("still fine");
        assert_eq!(narrator.capability().spoken(), vec!["still fine"]);
    }

    #[test]
    fn test_blank_text_is_not_spoken() {
        let mut narrator = narrator();
        narrator.speak("   ");
        assert!(narrator.capability().events.is_empty());
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut narrator = narrator();
        narrator.poll(1_000);
        narrator.poll(10);
        narrator.speak_after("x", 5);
        narrator.poll(1_004);
        assert!(narrator.has_pending());
        narrator.poll(1_005);
        assert_eq!(narrator.capability().spoken(), vec!["x"]);
    }

    #[test]
    fn test_silent_speech() {
        let mut narrator = VoiceNarrator::new(SilentSpeech).with_muted(false);
        narrator.speak("nothing happens");
        assert!(narrator.capability().list_voices().unwrap().is_empty());
    }

    #[test]
    fn test_boxed_capability() {
        let boxed: Box<dyn SpeechCapability> = Box::new(SilentSpeech);
        let mut narrator = VoiceNarrator::new(boxed);
        narrator.speak("boxed");
        narrator.cancel();
    }
}
