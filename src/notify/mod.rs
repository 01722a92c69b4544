//! Phase-transition cues for the Interval Timer.
//!
//! The timer engine calls a [`NotificationSink`] synchronously whenever a
//! phase starts or the workout completes. Sinks are fire-and-forget: a
//! failing sink is logged and never changes timer state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   TimerEngine    │
//! └────────┬─────────┘
//!          │ notify(kind)
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ NotificationSink │────▶│  RodioBeepSink   │──▶ audio thread
//! │                  │     ├──────────────────┤
//! │                  │────▶│     LogSink      │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ MockNotification │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! Each cue has its own pitch so the phases can be told apart by ear:
//! rest is lower than work, completion is highest.

mod beep;
mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tracing::info;

pub use beep::{try_create_sink, RodioBeepSink};
pub use error::NotifyError;

// ============================================================================
// NotificationKind
// ============================================================================

/// The transitions that produce a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// A work phase has begun
    WorkStarted,
    /// A rest phase has begun
    RestStarted,
    /// The last round finished
    WorkoutComplete,
}

impl NotificationKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::WorkStarted => "work_started",
            NotificationKind::RestStarted => "rest_started",
            NotificationKind::WorkoutComplete => "workout_complete",
        }
    }

    /// Returns the tone used for this cue.
    pub fn tone(&self) -> Tone {
        match self {
            NotificationKind::WorkStarted => Tone::new(800.0, 300),
            NotificationKind::RestStarted => Tone::new(600.0, 300),
            NotificationKind::WorkoutComplete => Tone::new(1000.0, 500),
        }
    }
}

// ============================================================================
// Tone
// ============================================================================

/// A sine beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Pitch in hertz
    pub frequency_hz: f32,
    /// Length in milliseconds
    pub duration_ms: u64,
}

impl Tone {
    pub fn new(frequency_hz: f32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// ============================================================================
// NotificationSink
// ============================================================================

/// Receives phase-transition cues from the timer engine.
///
/// Implementations must return quickly; the engine calls them while
/// holding its state.
pub trait NotificationSink: Send + Sync {
    /// Produces the cue for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cue could not be produced. The engine logs
    /// the error and continues.
    fn notify(&self, kind: NotificationKind) -> Result<(), NotifyError>;
}

/// A sink that only writes cues to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, kind: NotificationKind) -> Result<(), NotifyError> {
        info!("Cue: {}", kind.as_str());
        Ok(())
    }
}

/// Mock notification sink for testing.
#[derive(Debug, Default)]
pub struct MockNotificationSink {
    calls: Mutex<Vec<NotificationKind>>,
    should_fail: AtomicBool,
}

impl MockNotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<NotificationKind> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.calls.lock().unwrap().iter().filter(|k| **k == kind).count()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, kind: NotificationKind) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(kind);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Other("Mock failure".to_string()));
        }
        Ok(())
    }
}
