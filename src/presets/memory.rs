//! In-memory preset store.

use tracing::debug;
use uuid::Uuid;

use super::error::PresetError;
use super::PresetStore;
use crate::types::TimerConfig;

/// Preset store that keeps presets in insertion order.
///
/// Also used by the file store as its working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPresetStore {
    presets: Vec<TimerConfig>,
    /// Set once the store holds loaded data or has been mutated
    written: bool,
}

impl InMemoryPresetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given presets as-is.
    ///
    /// The result counts as previously written, even when `presets` is empty.
    pub fn from_presets(presets: Vec<TimerConfig>) -> Self {
        Self {
            presets,
            written: true,
        }
    }

    /// Consumes the store, returning its presets.
    pub fn into_presets(self) -> Vec<TimerConfig> {
        self.presets
    }

    /// Returns the presets without copying.
    pub fn presets(&self) -> &[TimerConfig] {
        &self.presets
    }

    /// Inserts or replaces a preset.
    ///
    /// An empty id gets a fresh UUID; an existing id replaces that entry in
    /// place.
    pub fn upsert(&mut self, mut config: TimerConfig) -> Result<TimerConfig, PresetError> {
        config.validate()?;

        if !config.has_id() {
            config.id = Uuid::new_v4().to_string();
        }

        match self.presets.iter_mut().find(|p| p.id == config.id) {
            Some(existing) => {
                debug!("Replacing preset {}", config.id);
                *existing = config.clone();
            }
            None => {
                debug!("Adding preset {}", config.id);
                self.presets.push(config.clone());
            }
        }
        self.written = true;

        Ok(config)
    }

    /// Removes a preset by id.
    pub fn remove(&mut self, id: &str) -> Result<TimerConfig, PresetError> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))?;
        self.written = true;
        Ok(self.presets.remove(index))
    }
}

impl PresetStore for InMemoryPresetStore {
    fn is_new(&self) -> Result<bool, PresetError> {
        Ok(!self.written)
    }

    fn list_all(&self) -> Result<Vec<TimerConfig>, PresetError> {
        Ok(self.presets.clone())
    }

    fn save(&mut self, config: TimerConfig) -> Result<TimerConfig, PresetError> {
        self.upsert(config)
    }

    fn delete(&mut self, id: &str) -> Result<(), PresetError> {
        self.remove(id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigError, IntervalSettings};

    #[test]
    fn test_save_assigns_id() {
        let mut store = InMemoryPresetStore::new();

        let saved = store
            .save(TimerConfig::new("Mine", IntervalSettings::new(25, 5, 4)))
            .unwrap();

        assert!(saved.has_id());
        assert!(Uuid::parse_str(&saved.id).is_ok());
        assert_eq!(store.list_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_save_distinct_ids() {
        let mut store = InMemoryPresetStore::new();
        let a = store
            .save(TimerConfig::new("A", IntervalSettings::default()))
            .unwrap();
        let b = store
            .save(TimerConfig::new("A", IntervalSettings::default()))
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.presets().len(), 2);
    }

    #[test]
    fn test_save_with_existing_id_replaces_in_place() {
        let mut store = InMemoryPresetStore::new();
        store
            .save(TimerConfig::with_id("one", "One", IntervalSettings::default()))
            .unwrap();
        store
            .save(TimerConfig::with_id("two", "Two", IntervalSettings::default()))
            .unwrap();

        store
            .save(TimerConfig::with_id("one", "One v2", IntervalSettings::new(5, 5, 5)))
            .unwrap();

        let names: Vec<_> = store.presets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["One v2", "Two"]);
    }

    #[test]
    fn test_save_rejects_invalid() {
        let mut store = InMemoryPresetStore::new();

        let err = store
            .save(TimerConfig::new("", IntervalSettings::default()))
            .unwrap_err();

        assert!(matches!(err, PresetError::Invalid(ConfigError::EmptyName)));
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_delete() {
        let mut store = InMemoryPresetStore::new();
        let saved = store
            .save(TimerConfig::new("Gone", IntervalSettings::default()))
            .unwrap();

        store.delete(&saved.id).unwrap();

        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_is_new_until_first_write() {
        let mut store = InMemoryPresetStore::new();
        assert!(store.is_new().unwrap());

        let saved = store
            .save(TimerConfig::new("Once", IntervalSettings::default()))
            .unwrap();
        store.delete(&saved.id).unwrap();

        assert!(store.presets().is_empty());
        assert!(!store.is_new().unwrap());
        assert!(!InMemoryPresetStore::from_presets(Vec::new()).is_new().unwrap());
    }

    #[test]
    fn test_delete_missing() {
        let mut store = InMemoryPresetStore::new();
        let err = store.delete("nope").unwrap_err();
        assert!(err.is_not_found());
    }
}
