//! Configuration management for firstaid.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::content::Language;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "firstaid";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "firstaid.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FIRSTAID_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FIRSTAID_`, sections separated
///    by `__`, e.g. `FIRSTAID_NAVIGATION__IDLE_TIMEOUT_SECS=120`)
/// 2. TOML config file at `~/.config/firstaid/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language settings.
    pub general: GeneralConfig,
    /// View routing settings.
    pub navigation: NavigationConfig,
    /// Speech settings.
    pub narration: NarrationConfig,
    /// Linear guide settings.
    pub guide: GuideConfig,
    /// CPR settings.
    pub cpr: CprConfig,
    /// Storage settings.
    pub storage: StorageConfig,
}

/// Language settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Language code the session starts in (`en` or `ar`).
    pub language: String,
    /// Treat an unknown language code as a configuration error instead of
    /// falling back to English.
    pub strict_language: bool,
}

/// View routing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Seconds without input before a guide returns to the home screen.
    pub idle_timeout_secs: u32,
    /// Key codes or characters that jump straight to CPR.
    pub panic_keys: Vec<String>,
}

/// Speech settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Use the platform speech engine at all.
    pub enabled: bool,
    /// Start sessions muted.
    pub start_muted: bool,
    /// Speech rate, 1.0 being the engine default.
    pub rate: f32,
    /// Delay before narrating a linear guide step, in milliseconds.
    pub guide_delay_ms: u64,
    /// Delay before narrating a CPR step, in milliseconds.
    pub cpr_delay_ms: u64,
}

/// Linear guide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Countdown restored by a timer reset when the step's own value is unknown.
    pub default_timer_secs: u32,
}

/// CPR settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CprConfig {
    /// First step index at which the compression rhythm runs.
    pub rhythm_start_step: usize,
    /// Rhythm half-period in milliseconds.
    pub rhythm_interval_ms: u64,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/firstaid/firstaid.db`
    pub database_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: Language::English.code().to_string(),
            strict_language: false,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 300,
            panic_keys: vec!["Space".to_string(), "c".to_string(), "C".to_string()],
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_muted: false,
            rate: 0.9,
            guide_delay_ms: 300,
            cpr_delay_ms: 100,
        }
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            default_timer_secs: 600,
        }
    }
}

impl Default for CprConfig {
    fn default() -> Self {
        Self {
            rhythm_start_step: 3,
            rhythm_interval_ms: 545,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file from
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.navigation.idle_timeout_secs == 0 {
            return Err(invalid("navigation.idle_timeout_secs must be greater than 0"));
        }

        if self.navigation.panic_keys.iter().all(|k| k.is_empty()) {
            return Err(invalid("navigation.panic_keys must name at least one key"));
        }

        let rate = self.narration.rate;
        if !(rate > 0.0 && rate <= 10.0) {
            return Err(invalid(format!(
                "narration.rate must be in (0, 10], got {rate}"
            )));
        }

        if self.cpr.rhythm_interval_ms == 0 {
            return Err(invalid("cpr.rhythm_interval_ms must be greater than 0"));
        }

        if self.guide.default_timer_secs == 0 {
            return Err(invalid("guide.default_timer_secs must be greater than 0"));
        }

        if self.general.strict_language {
            Language::from_code(&self.general.language).map_err(|err| invalid(err.to_string()))?;
        }

        Ok(())
    }

    /// The starting language.
    ///
    /// Unknown codes fall back to English unless `strict_language` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLanguage`] for an unknown code in strict mode.
    pub fn language(&self) -> Result<Language> {
        if self.general.strict_language {
            Language::from_code(&self.general.language)
        } else {
            Ok(Language::from_code_lossy(&self.general.language))
        }
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigValidation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.language, "en");
        assert!(!config.general.strict_language);
        assert_eq!(config.navigation.idle_timeout_secs, 300);
        assert_eq!(config.navigation.panic_keys, vec!["Space", "c", "C"]);
        assert!(config.narration.enabled);
        assert!(!config.narration.start_muted);
        assert!((config.narration.rate - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.narration.guide_delay_ms, 300);
        assert_eq!(config.narration.cpr_delay_ms, 100);
        assert_eq!(config.guide.default_timer_secs, 600);
        assert_eq!(config.cpr.rhythm_start_step, 3);
        assert_eq!(config.cpr.rhythm_interval_ms, 545);
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_idle_timeout() {
        let mut config = Config::default();
        config.navigation.idle_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("idle_timeout_secs"));
    }

    #[test]
    fn test_validate_empty_panic_keys() {
        let mut config = Config::default();
        config.navigation.panic_keys.clear();
        assert!(config.validate().is_err());

        config.navigation.panic_keys = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rate_bounds() {
        let mut config = Config::default();
        for bad in [0.0, -1.0, 10.5, f32::NAN] {
            config.narration.rate = bad;
            assert!(config.validate().is_err(), "rate {bad}");
        }
        config.narration.rate = 10.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_rhythm_interval() {
        let mut config = Config::default();
        config.cpr.rhythm_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_default_timer() {
        let mut config = Config::default();
        config.guide.default_timer_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_language_lenient_by_default() {
        let mut config = Config::default();
        config.general.language = "fr".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.language().unwrap(), Language::English);
    }

    #[test]
    fn test_unknown_language_strict() {
        let mut config = Config::default();
        config.general.language = "fr".to_string();
        config.general.strict_language = true;
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation { .. })
        ));
        assert!(matches!(
            config.language(),
            Err(Error::UnknownLanguage { .. })
        ));
    }

    #[test]
    fn test_arabic_language() {
        let mut config = Config::default();
        config.general.language = "ar".to_string();
        assert_eq!(config.language().unwrap(), Language::Arabic);
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.ends_with("firstaid/firstaid.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/tmp/kit.db"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/kit.db"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.ends_with("firstaid/config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.cpr, CprConfig::default());
        assert_eq!(config.guide, GuideConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "firstaid_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[general]\nlanguage = \"ar\"\n\n[cpr]\nrhythm_interval_ms = 500\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.language().unwrap(), Language::Arabic);
        assert_eq!(config.cpr.rhythm_interval_ms, 500);
        assert_eq!(config.cpr.rhythm_start_step, 3);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "firstaid_config_invalid_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[navigation]\nidle_timeout_secs = 0\n").unwrap();

        let err = Config::load_from(Some(path.clone())).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serializes_to_toml_sections() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"navigation\""));
        assert!(json.contains("\"rhythm_interval_ms\":545"));
    }
}
