//! Interval Timer Library
//!
//! This library provides the core functionality for the Interval Timer CLI.
//! It includes:
//! - Timer engine: the work/rest countdown state machine
//! - Injected clocks and the driver loop that ticks the engine
//! - Preset storage (in-memory and JSON file) with default presets
//! - Notification sinks for phase-change cues (rodio beeps, log, mock)
//! - Application settings
//! - CLI command parsing, display and the interactive session

pub mod cli;
pub mod engine;
pub mod notify;
pub mod presets;
pub mod settings;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_clock, ConfigError, IntervalSettings, Phase, Status, TimerConfig, TimerRunState,
    TimerSnapshot,
};

// Re-export engine types
pub use engine::{
    drive, Clock, ClockHandle, DriveOutcome, EngineError, IntervalClock, ManualClock,
    TickOutcome, TimerEngine,
};

// Re-export notification types
pub use notify::{
    try_create_sink, LogSink, MockNotificationSink, NotificationKind, NotificationSink,
    NotifyError, RodioBeepSink, Tone,
};

// Re-export preset types
pub use presets::{
    default_presets, find_preset, seed_defaults_if_new, InMemoryPresetStore,
    JsonFilePresetStore, PresetError, PresetStore,
};

pub use settings::{AppSettings, SettingsError};
