//! macOS speech backend for firstaid.
//!
//! Narration on macOS is delegated to the built-in `say` command. Each
//! utterance runs as its own child process so that cancellation is a matter
//! of killing that process.

#![cfg(target_os = "macos")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod speech;

pub use speech::{list_voices, parse_voices, SpeechError, SystemSpeech, Voice};

/// Initialize macOS-specific components.
///
/// # Errors
///
/// Returns [`SpeechError::EngineMissing`] if `say` cannot be launched.
pub fn init() -> Result<(), SpeechError> {
    tracing::info!("Initializing macOS speech backend");
    speech::check_engine()
}

/// Get the platform name.
#[must_use]
pub fn platform_name() -> &'static str {
    "macOS"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name(), "macOS");
    }
}
