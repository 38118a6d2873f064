//! Platform speech engine.
//!
//! Linux uses `espeak-ng` and macOS uses `say`, each through its platform
//! crate. Other targets have no engine; [`SystemSpeech::new`] reports that
//! and callers fall back to [`SilentSpeech`](super::SilentSpeech).
//!
//! `say` ignores language tags, so on macOS an utterance without a matched
//! voice is spoken by an installed voice for its language, if there is one.

use super::{SpeechCapability, SpeechError, Utterance, Voice};

#[cfg(target_os = "linux")]
use firstaid_linux as platform;
#[cfg(target_os = "macos")]
use firstaid_mac as platform;

/// Human-readable name of the current platform.
#[must_use]
pub fn platform_name() -> &'static str {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        platform::platform_name()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        std::env::consts::OS
    }
}

/// Query installed voices without constructing a speaker.
///
/// This blocks on a child process; run it off the event loop.
///
/// # Errors
///
/// Returns [`SpeechError::Unavailable`] if there is no engine.
pub fn list_voices() -> Result<Vec<Voice>, SpeechError> {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        platform::list_voices()
            .map(|voices| {
                voices
                    .into_iter()
                    .map(|v| Voice::new(v.name, v.lang))
                    .collect()
            })
            .map_err(|err| SpeechError::Unavailable(err.to_string()))
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        Err(SpeechError::Unavailable(format!(
            "no speech engine on {}",
            std::env::consts::OS
        )))
    }
}

/// First installed voice whose primary subtag matches `language_tag`'s.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn fallback_voice<'a>(language_tag: &str, voices: &'a [Voice]) -> Option<&'a Voice> {
    let primary = |tag: &str| tag.split(['-', '_']).next().map(str::to_ascii_lowercase);
    let wanted = primary(language_tag).filter(|p| !p.is_empty())?;
    voices
        .iter()
        .find(|voice| primary(&voice.lang).as_deref() == Some(wanted.as_str()))
}

/// The platform's speech engine.
#[derive(Debug)]
pub struct SystemSpeech {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    inner: platform::SystemSpeech,
    /// Voices listed on first fallback lookup.
    #[cfg(target_os = "macos")]
    installed: Option<Vec<Voice>>,
}

impl SystemSpeech {
    /// Connect to the platform engine.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::Unavailable`] if the engine is missing.
    pub fn new() -> Result<Self, SpeechError> {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            platform::init().map_err(|err| SpeechError::Unavailable(err.to_string()))?;
            Ok(Self {
                inner: platform::SystemSpeech::new(),
                #[cfg(target_os = "macos")]
                installed: None,
            })
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            Err(SpeechError::Unavailable(format!(
                "no speech engine on {}",
                std::env::consts::OS
            )))
        }
    }
}

#[cfg(target_os = "macos")]
impl SystemSpeech {
    /// Name of an installed voice for `language_tag`, listing voices once.
    fn fallback_for(&mut self, language_tag: &str) -> Option<String> {
        if language_tag.eq_ignore_ascii_case(super::ENGLISH_TAG) {
            return None;
        }
        let installed = self.installed.get_or_insert_with(|| {
            list_voices().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Could not list voices for fallback");
                Vec::new()
            })
        });
        let voice = fallback_voice(language_tag, installed);
        if voice.is_none() {
            tracing::debug!(language_tag, "No installed voice for language");
        }
        voice.map(|v| v.name.clone())
    }
}

impl SpeechCapability for SystemSpeech {
    fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        list_voices()
    }

    #[cfg(target_os = "linux")]
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        // espeak-ng selects voices by language code
        self.inner
            .speak(&utterance.text, &utterance.language_tag, utterance.rate)
            .map_err(|err| SpeechError::Failed(err.to_string()))
    }

    #[cfg(target_os = "macos")]
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let fallback;
        let voice = match &utterance.voice {
            Some(voice) => Some(voice.name.as_str()),
            None => {
                fallback = self.fallback_for(&utterance.language_tag);
                fallback.as_deref()
            }
        };
        self.inner
            .speak(&utterance.text, voice, utterance.rate)
            .map_err(|err| SpeechError::Failed(err.to_string()))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable("no speech engine".to_string()))
    }

    fn cancel(&mut self) {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        self.inner.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name_not_empty() {
        assert!(!platform_name().is_empty());
    }

    #[test]
    fn test_fallback_voice_matches_primary_subtag() {
        let voices = vec![
            Voice::new("Samantha", "en_US"),
            Voice::new("Marathi", "mr-IN"),
            Voice::new("Majed", "ar_001"),
            Voice::new("Tarik", "ar-SA"),
        ];
        assert_eq!(fallback_voice("ar", &voices).map(|v| v.name.as_str()), Some("Majed"));
        assert_eq!(fallback_voice("AR-eg", &voices).map(|v| v.name.as_str()), Some("Majed"));
        assert_eq!(fallback_voice("en-US", &voices).map(|v| v.name.as_str()), Some("Samantha"));
    }

    #[test]
    fn test_fallback_voice_none_when_language_missing() {
        let voices = vec![Voice::new("Samantha", "en_US")];
        assert!(fallback_voice("ar", &voices).is_none());
        assert!(fallback_voice("ar", &[]).is_none());
        assert!(fallback_voice("", &voices).is_none());
    }

    #[test]
    fn test_system_speech_degrades_without_engine() {
        // Whether or not an engine is installed, construction never panics
        // and cancelling an idle speaker is harmless.
        if let Ok(mut speech) = SystemSpeech::new() {
            speech.cancel();
        }
    }
}
