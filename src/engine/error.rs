//! Timer engine error types.
//!
//! Engine commands never fail from I/O; every error here leaves the run
//! state exactly as it was before the command.

use thiserror::Error;

use crate::types::{ConfigError, Status};

/// Commands that can be refused in the current status.
///
/// `stop`, `reset` and `load_config` are accepted from every status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
}

impl Command {
    /// Returns the string representation of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by engine commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The command is not allowed in the current status.
    #[error("cannot {command} while the timer is {status}")]
    InvalidTransition { command: Command, status: Status },

    /// The supplied configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl EngineError {
    /// Returns true if the command was issued in a state that forbids it.
    #[must_use]
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Returns true if a configuration was rejected.
    #[must_use]
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidTransition {
                command: Command::Start,
                ..
            } => "the timer is already running; pause or stop it first",
            Self::InvalidTransition { .. } => "start the timer first",
            Self::InvalidConfig(_) => "durations and rounds must be at least 1",
        }
    }
}
