//! Core data types for the Interval Timer.
//!
//! This module defines the data structures used for:
//! - Phase and run-status enums
//! - Interval settings with validation
//! - Persisted preset records
//! - The transient run state owned by the engine
//! - Read-only snapshots for rendering

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Phase
// ============================================================================

/// The phase of the workout that is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No workout in progress
    #[default]
    Idle,
    /// Work interval
    Work,
    /// Rest interval
    Rest,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::Rest => "rest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Status
// ============================================================================

/// Whether the countdown is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not running; the next start begins a fresh workout
    #[default]
    Stopped,
    /// Counting down
    Running,
    /// Halted mid-phase; the next start resumes
    Paused,
}

impl Status {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Stopped => "stopped",
            Status::Running => "running",
            Status::Paused => "paused",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Reasons a configuration is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Work interval must be at least one second.
    #[error("work duration must be at least 1 second")]
    ZeroWorkSeconds,

    /// Rest interval must be at least one second.
    #[error("rest duration must be at least 1 second")]
    ZeroRestSeconds,

    /// A finite workout needs at least one round.
    #[error("number of rounds must be at least 1")]
    ZeroRounds,

    /// Presets need a display name.
    #[error("preset name must not be empty")]
    EmptyName,
}

// ============================================================================
// IntervalSettings
// ============================================================================

/// Durations and round count that govern a workout.
///
/// Serialized with the field names of the persisted preset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSettings {
    /// Work interval in seconds (>= 1)
    #[serde(rename = "workDuration")]
    pub work_seconds: u32,
    /// Rest interval in seconds (>= 1)
    #[serde(rename = "restDuration")]
    pub rest_seconds: u32,
    /// Number of rounds; ignored for termination when infinite
    pub rounds: u32,
    /// Whether the workout repeats until stopped
    #[serde(rename = "isInfinite")]
    pub is_infinite: bool,
}

impl Default for IntervalSettings {
    fn default() -> Self {
        Self {
            work_seconds: 30,
            rest_seconds: 10,
            rounds: 8,
            is_infinite: false,
        }
    }
}

impl IntervalSettings {
    /// Creates finite settings.
    pub fn new(work_seconds: u32, rest_seconds: u32, rounds: u32) -> Self {
        Self {
            work_seconds,
            rest_seconds,
            rounds,
            is_infinite: false,
        }
    }

    /// Sets the work duration.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Sets the rest duration.
    pub fn with_rest_seconds(mut self, seconds: u32) -> Self {
        self.rest_seconds = seconds;
        self
    }

    /// Sets the round count.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets infinite mode.
    pub fn with_infinite(mut self, is_infinite: bool) -> Self {
        self.is_infinite = is_infinite;
        self
    }

    /// Validates the settings.
    ///
    /// The round count is only checked for finite workouts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_seconds == 0 {
            return Err(ConfigError::ZeroWorkSeconds);
        }
        if self.rest_seconds == 0 {
            return Err(ConfigError::ZeroRestSeconds);
        }
        if !self.is_infinite && self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }

    /// Length of the given phase in seconds. Idle reports the work length,
    /// which is what a fresh start counts down from.
    pub fn phase_seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle | Phase::Work => self.work_seconds,
            Phase::Rest => self.rest_seconds,
        }
    }

    /// Total workout length in seconds, or `None` in infinite mode.
    pub fn total_workout_seconds(&self) -> Option<u64> {
        if self.is_infinite {
            return None;
        }
        let round = u64::from(self.work_seconds) + u64::from(self.rest_seconds);
        Some(round * u64::from(self.rounds))
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// A named, persisted workout definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Unique identifier; empty until the preset store assigns one
    #[serde(default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Interval values
    #[serde(flatten)]
    pub settings: IntervalSettings,
}

impl TimerConfig {
    /// Creates an unsaved preset (no id yet).
    pub fn new(name: impl Into<String>, settings: IntervalSettings) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            settings,
        }
    }

    /// Creates a preset with a fixed id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, settings: IntervalSettings) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            settings,
        }
    }

    /// Returns true once the store has assigned an id.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Validates the name and interval values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        self.settings.validate()
    }
}

// ============================================================================
// TimerRunState
// ============================================================================

/// Transient countdown state, exclusively owned by the timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRunState {
    /// Active phase
    pub phase: Phase,
    /// Run status
    pub status: Status,
    /// Seconds left in the active phase
    pub seconds_remaining: u32,
    /// 1-based round counter
    pub current_round: u32,
    /// Settings copied in when the configuration was loaded
    pub settings: IntervalSettings,
}

impl TimerRunState {
    /// Creates a stopped state pre-loaded with the work duration.
    pub fn new(settings: IntervalSettings) -> Self {
        Self {
            phase: Phase::Idle,
            status: Status::Stopped,
            seconds_remaining: settings.work_seconds,
            current_round: 1,
            settings,
        }
    }

    /// Begins a fresh workout at round 1.
    pub fn begin(&mut self) {
        self.current_round = 1;
        self.enter_work();
        self.status = Status::Running;
    }

    /// Enters the work phase with a full work interval.
    pub fn enter_work(&mut self) {
        self.phase = Phase::Work;
        self.seconds_remaining = self.settings.work_seconds;
    }

    /// Enters the rest phase with a full rest interval.
    pub fn enter_rest(&mut self) {
        self.phase = Phase::Rest;
        self.seconds_remaining = self.settings.rest_seconds;
    }

    /// Moves to the next round. Saturates instead of wrapping.
    pub fn advance_round(&mut self) {
        self.current_round = self.current_round.saturating_add(1);
    }

    /// Halts the countdown. Only status changes.
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
        }
    }

    /// Continues a paused countdown where it left off.
    pub fn resume(&mut self) {
        if self.status == Status::Paused {
            self.status = Status::Running;
        }
    }

    /// Returns to the stopped shape, ready for the next start.
    pub fn reset(&mut self) {
        self.status = Status::Stopped;
        self.phase = Phase::Idle;
        self.current_round = 1;
        self.seconds_remaining = self.settings.work_seconds;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the phase has run out.
    pub fn tick(&mut self) -> bool {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining == 0
    }

    /// Returns true if the round that just rested was the last one.
    pub fn is_final_round(&self) -> bool {
        !self.settings.is_infinite && self.current_round >= self.settings.rounds
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Returns true if the countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    /// Returns true if no workout is in progress.
    pub fn is_stopped(&self) -> bool {
        self.status == Status::Stopped
    }

    /// Projects the state into a read-only snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            status: self.status,
            seconds_remaining: self.seconds_remaining,
            current_round: self.current_round,
            work_seconds: self.settings.work_seconds,
            rest_seconds: self.settings.rest_seconds,
            rounds: self.settings.rounds,
            is_infinite: self.settings.is_infinite,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only projection of the run state, produced after every command and tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub status: Status,
    pub seconds_remaining: u32,
    pub current_round: u32,
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub rounds: u32,
    pub is_infinite: bool,
}

impl TimerSnapshot {
    /// Length of the phase being counted down.
    pub fn phase_seconds(&self) -> u32 {
        match self.phase {
            Phase::Rest => self.rest_seconds,
            Phase::Idle | Phase::Work => self.work_seconds,
        }
    }

    /// Percentage of the current phase that has elapsed (0-100).
    pub fn interval_progress(&self) -> f64 {
        if self.phase == Phase::Idle {
            return 0.0;
        }
        let total = self.phase_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.seconds_remaining);
        f64::from(elapsed) / f64::from(total) * 100.0
    }

    /// Percentage of rounds completed, or `None` in infinite mode.
    pub fn round_progress(&self) -> Option<f64> {
        if self.is_infinite || self.rounds == 0 {
            return None;
        }
        let done = self.current_round.saturating_sub(1);
        Some(f64::from(done) / f64::from(self.rounds) * 100.0)
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
