//! `espeak-ng` process management.

use std::io;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, trace, warn};

const ENGINE: &str = "espeak-ng";

/// espeak-ng's default rate in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Errors from the Linux speech backend.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The synthesizer binary could not be found.
    #[error("{program} is not installed or not on PATH")]
    EngineMissing {
        /// Program that was looked for.
        program: String,
    },

    /// The synthesizer ran but reported failure.
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

/// An installed espeak-ng voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Human-readable voice name, e.g. `Arabic`.
    pub name: String,
    /// Language code, e.g. `ar` or `en-us`.
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
    let status = Command::new(ENGINE)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(map_spawn_error)?;
    if status.success() {
        Ok(())
    } else {
        Err(SpeechError::EngineFailed {
            program: ENGINE.to_string(),
            status: status.to_string(),
        })
    }
}

/// List installed voices.
///
/// This runs `espeak-ng --voices` and blocks until it exits.
///
/// # Errors
///
/// Returns an error if the engine is missing or fails.
pub fn list_voices() -> Result<Vec<Voice>, SpeechError> {
    let output = Command::new(ENGINE)
        .arg("--voices")
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
    debug!(count = voices.len(), "Listed espeak-ng voices");
    Ok(voices)
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// Columns are priority, language, age/gender, voice name, file, other
/// languages. The header row and malformed rows are skipped.
#[must_use]
pub fn parse_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip_while(|line| line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let _priority = columns.next()?;
            let lang = columns.next()?;
            let _age_gender = columns.next()?;
            let name = columns.next()?;
            Some(Voice {
                name: name.replace('_', " "),
                lang: lang.to_string(),
            })
        })
        .collect()
}

/// Speaks one utterance at a time through `espeak-ng`.
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
    /// `lang` selects the espeak-ng voice (`ar`, `en-us`, ...). `rate` scales
    /// the default speaking rate. Anything still playing is stopped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    pub fn speak(&mut self, text: &str, lang: &str, rate: f32) -> Result<(), SpeechError> {
        self.cancel();

        let words_per_minute = words_per_minute(rate);
        trace!(lang, words_per_minute, "Spawning espeak-ng");
        let child = Command::new(ENGINE)
            .arg("-v")
            .arg(lang.to_ascii_lowercase())
            .arg("-s")
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
            match child.try_wait() {
                Ok(Some(_)) => {}
                Ok(None) => {
                    if let Err(err) = child.kill() {
                        warn!(error = %err, "Failed to stop espeak-ng");
                    }
                    let _ = child.wait();
                }
                Err(err) => warn!(error = %err, "Failed to poll espeak-ng"),
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
