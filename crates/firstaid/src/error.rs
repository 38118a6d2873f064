//! Error types for firstaid.
//!
//! This module defines the crate-wide error type. Most failures in the guidance
//! core are recovered locally (speech, corrupt kit data, unknown views), so the
//! variants here mainly surface from storage, configuration and strict content
//! resolution.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for firstaid operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Content Errors ===
    /// A language code has no localized content bundle.
    #[error("unknown language code '{code}' (expected \"en\" or \"ar\")")]
    UnknownLanguage {
        /// The code that was requested.
        code: String,
    },

    // === Kit Errors ===
    /// A kit item failed validation.
    #[error("invalid kit item: {message}")]
    InvalidKitItem {
        /// Why the item was rejected.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for firstaid operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown-language error for the given code.
    #[must_use]
    pub fn unknown_language(code: impl Into<String>) -> Self {
        Self::UnknownLanguage { code: code.into() }
    }

    /// Create a kit validation error.
    #[must_use]
    pub fn invalid_kit_item(message: impl Into<String>) -> Self {
        Self::InvalidKitItem {
            message: message.into(),
        }
    }

    /// Check if this error came from reading or decoding stored data.
    ///
    /// Callers use this to decide whether falling back to defaults is
    /// appropriate.
    #[must_use]
    pub fn is_recoverable_read(&self) -> bool {
        matches!(self, Self::Json(_) | Self::DatabaseQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_display() {
        let err = Error::unknown_language("fr");
        let msg = err.to_string();
        assert!(msg.contains("'fr'"));
        assert!(msg.contains("\"ar\""));
    }

    #[test]
    fn test_invalid_kit_item_display() {
        let err = Error::invalid_kit_item("name must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid kit item: name must not be empty"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_recoverable_read());
    }

    #[test]
    fn test_from_json_error_is_recoverable() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
            assert!(err.is_recoverable_read());
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "idle_timeout_secs must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("idle_timeout_secs"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_database_open_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
        }
    }
}
