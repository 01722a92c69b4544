//! Preset storage for the Interval Timer.
//!
//! Presets are named [`TimerConfig`] records. The engine never reads them
//! directly; the host loads a preset's settings into the engine on request.
//!
//! - `memory`: insertion-ordered in-memory store
//! - `file`: JSON file store under the user's config directory
//!
//! On first use the host seeds a fixed set of defaults with
//! [`seed_defaults_if_new`].

mod error;
mod file;
mod memory;

pub use error::PresetError;
pub use file::{JsonFilePresetStore, PRESETS_FILE_NAME};
pub use memory::InMemoryPresetStore;

use tracing::info;

use crate::types::{IntervalSettings, TimerConfig};

/// Storage for named presets.
///
/// `list_all` returns presets in a stable order as long as nothing is
/// saved or deleted in between.
pub trait PresetStore {
    /// Returns true if nothing has ever been written to the store.
    ///
    /// An emptied store is not new.
    fn is_new(&self) -> Result<bool, PresetError>;

    /// Returns every stored preset.
    fn list_all(&self) -> Result<Vec<TimerConfig>, PresetError>;

    /// Stores a preset, assigning an id when it has none.
    ///
    /// Saving with an id that already exists replaces that preset.
    fn save(&mut self, config: TimerConfig) -> Result<TimerConfig, PresetError>;

    /// Removes the preset with the given id.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::NotFound` if no preset has that id.
    fn delete(&mut self, id: &str) -> Result<(), PresetError>;
}

/// The presets offered on first use.
pub fn default_presets() -> Vec<TimerConfig> {
    vec![
        TimerConfig::with_id("default-tabata", "Tabata", IntervalSettings::new(20, 10, 8)),
        TimerConfig::with_id(
            "default-hiit",
            "HIIT Classic",
            IntervalSettings::new(45, 15, 12),
        ),
        TimerConfig::with_id(
            "default-balanced",
            "Balanced",
            IntervalSettings::new(30, 30, 10),
        ),
        TimerConfig::with_id(
            "default-endurance",
            "Endurance",
            IntervalSettings::new(60, 20, 6),
        ),
        TimerConfig::with_id(
            "default-infinite",
            "Continuous HIIT",
            IntervalSettings::new(40, 20, 1).with_infinite(true),
        ),
    ]
}

/// Seeds [`default_presets`] into a store that has never been written.
///
/// A user who deletes every preset keeps an empty list. Returns true if the
/// store was seeded.
pub fn seed_defaults_if_new<S: PresetStore + ?Sized>(store: &mut S) -> Result<bool, PresetError> {
    if !store.is_new()? {
        return Ok(false);
    }

    for preset in default_presets() {
        store.save(preset)?;
    }
    info!("Seeded default presets");
    Ok(true)
}

/// Looks a preset up by exact id, then by case-insensitive name.
pub fn find_preset<S: PresetStore + ?Sized>(
    store: &S,
    id_or_name: &str,
) -> Result<Option<TimerConfig>, PresetError> {
    let presets = store.list_all()?;

    if let Some(found) = presets.iter().find(|p| p.id == id_or_name) {
        return Ok(Some(found.clone()));
    }

    let wanted = id_or_name.trim().to_lowercase();
    Ok(presets
        .into_iter()
        .find(|p| p.name.trim().to_lowercase() == wanted))
}
