//! Application settings.
//!
//! Settings are read from `<config_dir>/interval-timer/settings.json` when
//! that file exists. Every field has a default, so a partial file is fine.
//! Command-line flags override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::IntervalSettings;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "interval-timer";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns `<config_dir>/interval-timer`, or `./.interval-timer` when the
/// platform has no config directory.
pub fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

fn default_sound() -> bool {
    true
}

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`AppSettings`].
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings for the terminal timer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Preset file location; the default location is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets_file: Option<PathBuf>,

    /// Whether phase cues are played as beeps.
    #[serde(default = "default_sound")]
    pub sound: bool,

    /// Intervals used by `run` when no preset or flags are given.
    #[serde(default)]
    pub default_settings: IntervalSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            presets_file: None,
            sound: default_sound(),
            default_settings: IntervalSettings::default(),
        }
    }
}

impl AppSettings {
    /// Default settings file location.
    pub fn default_path() -> PathBuf {
        app_config_dir().join(SETTINGS_FILE_NAME)
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Returns the preset file to use, preferring `override_path`.
    pub fn presets_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.presets_file.clone())
            .unwrap_or_else(crate::presets::JsonFilePresetStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.presets_file.is_none());
        assert!(settings.sound);
        assert_eq!(settings.default_settings, IntervalSettings::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{"sound": false}"#).unwrap();

        let settings = AppSettings::load(&path).unwrap();

        assert!(!settings.sound);
        assert_eq!(settings.default_settings, IntervalSettings::default());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "presetsFile": "/tmp/p.json",
                "sound": true,
                "defaultSettings": {"workDuration": 20, "restDuration": 10, "rounds": 8, "isInfinite": false}
            }"#,
        )
        .unwrap();

        let settings = AppSettings::load(&path).unwrap();

        assert_eq!(settings.presets_file, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(settings.default_settings, IntervalSettings::new(20, 10, 8));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "sound = false").unwrap();

        assert!(matches!(
            AppSettings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_presets_path_precedence() {
        let mut settings = AppSettings::default();
        assert!(settings.presets_path(None).ends_with("presets.json"));

        settings.presets_file = Some(PathBuf::from("/from/settings.json"));
        assert_eq!(
            settings.presets_path(None),
            PathBuf::from("/from/settings.json")
        );
        assert_eq!(
            settings.presets_path(Some(Path::new("/from/flag.json"))),
            PathBuf::from("/from/flag.json")
        );
    }
}
