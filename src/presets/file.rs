//! JSON file preset store.
//!
//! Presets live in a single JSON array. Every mutation rewrites the whole
//! file through a temporary sibling and a rename.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::PresetError;
use super::memory::InMemoryPresetStore;
use super::PresetStore;
use crate::types::TimerConfig;

/// File name used under the application config directory.
pub const PRESETS_FILE_NAME: &str = "presets.json";

/// Preset store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// `<config_dir>/interval-timer/presets.json`, falling back to the
    /// current directory when no config directory is known.
    pub fn default_path() -> PathBuf {
        crate::settings::app_config_dir().join(PRESETS_FILE_NAME)
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<InMemoryPresetStore, PresetError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Preset file {} does not exist yet", self.path.display());
                return Ok(InMemoryPresetStore::new());
            }
            Err(source) => {
                return Err(PresetError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(InMemoryPresetStore::new());
        }

        let presets: Vec<TimerConfig> =
            serde_json::from_str(&contents).map_err(|source| PresetError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(InMemoryPresetStore::from_presets(presets))
    }

    fn persist(&self, store: &InMemoryPresetStore) -> Result<(), PresetError> {
        let io_err = |source| PresetError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(store.presets()).map_err(|source| {
            PresetError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        debug!(
            "Wrote {} presets to {}",
            store.presets().len(),
            self.path.display()
        );
        Ok(())
    }
}

impl PresetStore for JsonFilePresetStore {
    fn is_new(&self) -> Result<bool, PresetError> {
        self.path
            .try_exists()
            .map(|exists| !exists)
            .map_err(|source| PresetError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn list_all(&self) -> Result<Vec<TimerConfig>, PresetError> {
        Ok(self.load()?.into_presets())
    }

    fn save(&mut self, config: TimerConfig) -> Result<TimerConfig, PresetError> {
        let mut store = self.load()?;
        let saved = store.upsert(config)?;
        self.persist(&store)?;
        info!("Saved preset '{}' ({})", saved.name, saved.id);
        Ok(saved)
    }

    fn delete(&mut self, id: &str) -> Result<(), PresetError> {
        let mut store = self.load()?;
        let removed = store.remove(id)?;
        self.persist(&store)?;
        info!("Deleted preset '{}' ({})", removed.name, removed.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntervalSettings;

    fn temp_store() -> (tempfile::TempDir, JsonFilePresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePresetStore::new(dir.path().join("nested").join(PRESETS_FILE_NAME));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_is_new_until_file_exists() {
        let (_dir, mut store) = temp_store();
        assert!(store.is_new().unwrap());

        let saved = store
            .save(TimerConfig::new("Temp", IntervalSettings::default()))
            .unwrap();
        store.delete(&saved.id).unwrap();

        // An emptied file still exists
        assert!(!store.is_new().unwrap());
    }

    #[test]
    fn test_save_creates_file_and_parents() {
        let (_dir, mut store) = temp_store();

        let saved = store
            .save(TimerConfig::new("Boxing", IntervalSettings::new(180, 60, 12)))
            .unwrap();

        assert!(store.path().exists());
        assert_eq!(store.list_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_file_uses_persisted_record_shape() {
        let (_dir, mut store) = temp_store();
        store
            .save(TimerConfig::with_id("x", "X", IntervalSettings::new(20, 10, 8)))
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value[0]["workDuration"], 20);
        assert_eq!(value[0]["restDuration"], 10);
        assert_eq!(value[0]["isInfinite"], false);
    }

    #[test]
    fn test_reopen_sees_saved_presets() {
        let (_dir, mut store) = temp_store();
        store
            .save(TimerConfig::new("Keep", IntervalSettings::default()))
            .unwrap();

        let reopened = JsonFilePresetStore::new(store.path());
        assert_eq!(reopened.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_persists() {
        let (_dir, mut store) = temp_store();
        let saved = store
            .save(TimerConfig::new("Drop", IntervalSettings::default()))
            .unwrap();

        store.delete(&saved.id).unwrap();

        assert!(store.list_all().unwrap().is_empty());
        assert!(store.delete(&saved.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        let err = store.list_all().unwrap_err();
        assert!(matches!(err, PresetError::Parse { .. }));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(JsonFilePresetStore::default_path().ends_with(PRESETS_FILE_NAME));
    }
}
