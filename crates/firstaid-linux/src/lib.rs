//! Linux speech backend for firstaid.
//!
//! Narration on Linux is delegated to the `espeak-ng` command-line
//! synthesizer. Each utterance runs as its own child process so that
//! cancellation is a matter of killing that process.

#![cfg(target_os = "linux")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod speech;

pub use speech::{list_voices, parse_voices, SpeechError, SystemSpeech, Voice};

/// Initialize Linux-specific components.
///
/// Checks that the speech engine can be launched.
///
/// # Errors
///
/// Returns [`SpeechError::EngineMissing`] if `espeak-ng` is not installed.
pub fn init() -> Result<(), SpeechError> {
    speech::check_engine()?;
    tracing::debug!("espeak-ng available");
    Ok(())
}

/// Get platform name
#[must_use]
pub fn platform_name() -> &'static str {
    "Linux"
}
