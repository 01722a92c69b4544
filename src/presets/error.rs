//! Preset store error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigError;

/// Errors that can occur while reading or writing presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The preset file could not be read or written.
    #[error("failed to access preset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preset file is not a valid preset list.
    #[error("failed to parse preset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The preset list could not be encoded for writing.
    #[error("failed to serialize presets for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No preset has the given id.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// The preset failed validation.
    #[error("invalid preset: {0}")]
    Invalid(#[from] ConfigError),
}

impl PresetError {
    /// Returns true if the preset was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the failure came from the file system or file contents.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. } | Self::Serialize { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Io { .. } => "check that the preset file location is writable",
            Self::Parse { .. } => "fix or remove the preset file to start from the defaults",
            Self::Serialize { .. } => "the preset file was left unchanged; try saving again",
            Self::NotFound(_) => "run `interval-timer presets list` to see available ids",
            Self::Invalid(_) => "presets need a name and durations of at least 1 second",
        }
    }
}
