//! Notification sink error types.
//!
//! Sink failures never reach the timer engine's state; the engine logs
//! them and carries on.

use thiserror::Error;

/// Errors that can occur while producing a phase cue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create or feed the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The audio thread has gone away.
    #[error("audio thread is no longer running")]
    Disconnected,

    /// Generic cue failure.
    #[error("notification failed: {0}")]
    Other(String),
}

impl NotifyError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device or run with --no-sound",
            Self::StreamError(_) => "check the system audio settings",
            Self::Disconnected => "restart the timer",
            Self::Other(_) => "run with --verbose for details",
        }
    }
}
