//! `say` process management.

use std::io;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, trace, warn};

const ENGINE: &str = "say";

/// `say`'s default rate in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 180.0;

/// Errors from the macOS speech backend.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The `say` binary could not be launched.
    #[error("{program} is not available")]
    EngineMissing {
        /// Program that was looked for.
        program: String,
    },

    /// `say` ran but reported failure.
    #[error("{program} exited with status {status}")]
    EngineFailed {
        /// Program that failed.
        program: String,
        /// Exit status description.
        status: String,
    },

    /// Any other process I/O failure.
    #[error("speech I/O error: {0}")]
    Io(#[from] io::Error),
}

/// An installed system voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Voice name as accepted by `say -v`, e.g. `Majed`.
    pub name: String,
    /// BCP 47 style language tag, e.g. `ar-SA`.
    pub lang: String,
}

fn map_spawn_error(err: io::Error) -> SpeechError {
    if err.kind() == io::ErrorKind::NotFound {
        SpeechError::EngineMissing {
            program: ENGINE.to_string(),
        }
    } else {
        SpeechError::Io(err)
    }
}

pub(crate) fn check_engine() -> Result<(), SpeechError> {
    list_voices().map(|_| ())
}

/// List installed voices.
///
/// This runs `say -v ?` and blocks until it exits.
///
/// # Errors
///
/// Returns an error if `say` is missing or fails.
pub fn list_voices() -> Result<Vec<Voice>, SpeechError> {
    let output = Command::new(ENGINE)
        .args(["-v", "?"])
        .stdin(Stdio::null())
        .output()
        .map_err(map_spawn_error)?;

    if !output.status.success() {
        return Err(SpeechError::EngineFailed {
            program: ENGINE.to_string(),
            status: output.status.to_string(),
        });
    }

    let voices = parse_voices(&String::from_utf8_lossy(&output.stdout));
    debug!(count = voices.len(), "Listed say voices");
    Ok(voices)
}

/// Parse the listing printed by `say -v ?`.
///
/// Each line reads `<name> <locale> # <sample>`; names may contain spaces,
/// so the locale is taken as the last token before the `#`. Locales are
/// normalized from `ar_SA` to `ar-SA`.
#[must_use]
pub fn parse_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim_end();
            let (name, locale) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() || locale.is_empty() {
                return None;
            }
            Some(Voice {
                name: name.to_string(),
                lang: locale.replace('_', "-"),
            })
        })
        .collect()
}

/// Speaks one utterance at a time through `say`.
#[derive(Debug, Default)]
pub struct SystemSpeech {
    current: Option<Child>,
}

impl SystemSpeech {
    /// Create an idle speaker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start speaking `text` without waiting for it to finish.
    ///
    /// `voice` is a name from [`list_voices`]; without one the system default
    /// voice is used. Anything still playing is stopped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    pub fn speak(&mut self, text: &str, voice: Option<&str>, rate: f32) -> Result<(), SpeechError> {
        self.cancel();

        let words_per_minute = words_per_minute(rate);
        let mut command = Command::new(ENGINE);
        if let Some(voice) = voice {
            command.arg("-v").arg(voice);
        }
        trace!(?voice, words_per_minute, "Spawning say");
        let child = command
            .arg("-r")
            .arg(words_per_minute.to_string())
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(map_spawn_error)?;
        self.current = Some(child);
        Ok(())
    }

    /// Stop the current utterance, if any.
    pub fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                if let Err(err) = child.kill() {
                    warn!(error = %err, "Failed to stop say");
                }
                let _ = child.wait();
            }
        }
    }
}

impl Drop for SystemSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate.clamp(0.1, 10.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voices() {
        let listing = "\
Alex                en_US    # Most people recognize me by my voice.
Bad News            en_US    # The light you see at the end of the tunnel is the headlamp.
Majed               ar_001   # مرحبًا! اسمي ماجد.
";
        let voices = parse_voices(listing);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[1].name, "Bad News");
        assert_eq!(
            voices[2],
            Voice {
                name: "Majed".to_string(),
                lang: "ar-001".to_string()
            }
        );
    }

    #[test]
    fn test_parse_voices_skips_garbage() {
        assert!(parse_voices("").is_empty());
        assert!(parse_voices("lonely\n").is_empty());
    }

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute(1.0), 180);
        assert_eq!(words_per_minute(2.0), 360);
    }

    #[test]
    fn test_idle_speaker() {
        let mut speech = SystemSpeech::new();
        assert!(speech.current.is_none());
        speech.cancel();
        assert!(speech.current.is_none());
    }
}
