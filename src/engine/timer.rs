//! Timer engine for the Interval Timer.
//!
//! This module provides the countdown state machine:
//! - Commands (start/pause/stop/reset/load config)
//! - Work → Rest → Work phase transitions on `tick`
//! - Finite and infinite round handling
//! - Snapshot emission after every command and tick
//! - Cues through the injected notification sink

use std::sync::Arc;

use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, warn};

use super::error::{Command, EngineError};
use crate::notify::{NotificationKind, NotificationSink};
use crate::types::{IntervalSettings, Phase, Status, TimerRunState, TimerSnapshot};

// ============================================================================
// TickOutcome
// ============================================================================

/// What a single tick did to the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// One second elapsed within the current phase
    Counted,
    /// Work ran out and the rest phase began
    EnteredRest,
    /// Rest ran out and the next round's work phase began
    EnteredWork,
    /// Rest of the final round ran out; the timer stopped
    Completed,
}

impl TickOutcome {
    /// Returns true if the tick changed the phase.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            TickOutcome::EnteredRest | TickOutcome::EnteredWork | TickOutcome::Completed
        )
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Countdown state machine that owns a [`TimerRunState`].
pub struct TimerEngine {
    /// Current run state
    state: TimerRunState,
    /// Receives phase cues
    sink: Arc<dyn NotificationSink>,
    /// Optional snapshot channel for renderers
    snapshot_tx: Option<mpsc::UnboundedSender<TimerSnapshot>>,
    /// Signalled every time the timer enters Running
    started: Arc<Notify>,
}

impl TimerEngine {
    /// Creates a stopped engine.
    ///
    /// The settings are trusted as given; use [`TimerEngine::load_config`]
    /// to validate user input.
    pub fn new(settings: IntervalSettings, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            state: TimerRunState::new(settings),
            sink,
            snapshot_tx: None,
            started: Arc::new(Notify::new()),
        }
    }

    /// Attaches a channel that receives a snapshot after every command and tick.
    pub fn with_snapshot_channel(mut self, tx: mpsc::UnboundedSender<TimerSnapshot>) -> Self {
        self.snapshot_tx = Some(tx);
        self
    }

    /// Starts a fresh workout, or resumes a paused one.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTransition` if the timer is already
    /// counting down.
    pub fn start(&mut self) -> Result<TimerSnapshot, EngineError> {
        match self.state.status {
            Status::Running => return Err(self.invalid(Command::Start)),
            Status::Paused => {
                self.state.resume();
                info!(
                    "Resumed {} with {}s left (round {})",
                    self.state.phase, self.state.seconds_remaining, self.state.current_round
                );
            }
            Status::Stopped => {
                self.state.begin();
                info!(
                    "Started workout: {}s work, {}s rest, {}",
                    self.state.settings.work_seconds,
                    self.state.settings.rest_seconds,
                    rounds_label(&self.state.settings)
                );
                self.notify(NotificationKind::WorkStarted);
            }
        }

        self.started.notify_one();
        Ok(self.emit())
    }

    /// Pauses the countdown.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTransition` unless the timer is running.
    pub fn pause(&mut self) -> Result<TimerSnapshot, EngineError> {
        if !self.state.is_running() {
            return Err(self.invalid(Command::Pause));
        }

        self.state.pause();
        info!(
            "Paused {} with {}s left",
            self.state.phase, self.state.seconds_remaining
        );

        Ok(self.emit())
    }

    /// Stops the workout and pre-loads the work duration for the next start.
    ///
    /// Stopping an already stopped timer re-applies the stopped shape.
    pub fn stop(&mut self) -> Result<TimerSnapshot, EngineError> {
        if !self.state.is_stopped() {
            info!("Stopped at round {}", self.state.current_round);
        }
        self.state.reset();
        Ok(self.emit())
    }

    /// Same effect as [`TimerEngine::stop`].
    pub fn reset(&mut self) -> Result<TimerSnapshot, EngineError> {
        debug!("Reset requested");
        self.stop()
    }

    /// Adopts new settings, stopping any workout in progress first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the settings are rejected; the
    /// run state is left untouched in that case.
    pub fn load_config(&mut self, settings: IntervalSettings) -> Result<TimerSnapshot, EngineError> {
        settings.validate()?;

        if !self.state.is_stopped() {
            info!("Stopping current workout to load new configuration");
            self.state.reset();
        }

        self.state = TimerRunState::new(settings);
        debug!(
            "Loaded configuration: {}s work, {}s rest, {}",
            settings.work_seconds,
            settings.rest_seconds,
            rounds_label(&settings)
        );

        Ok(self.emit())
    }

    /// Advances the countdown by one second.
    ///
    /// Ignored unless the timer is running. A single tick causes at most one
    /// phase transition.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        let outcome = if !self.state.tick() {
            TickOutcome::Counted
        } else {
            self.handle_phase_complete()
        };

        if outcome.is_transition() {
            debug!(
                "Tick transition {:?}: {} {}s round {}",
                outcome,
                self.state.phase,
                self.state.seconds_remaining,
                self.state.current_round
            );
        }

        self.emit();
        outcome
    }

    /// Handles a phase that has just run out.
    fn handle_phase_complete(&mut self) -> TickOutcome {
        match self.state.phase {
            Phase::Work => {
                self.state.enter_rest();
                self.notify(NotificationKind::RestStarted);
                TickOutcome::EnteredRest
            }
            Phase::Rest => {
                if self.state.is_final_round() {
                    let rounds = self.state.current_round;
                    self.state.reset();
                    info!("Workout complete after {} rounds", rounds);
                    self.notify(NotificationKind::WorkoutComplete);
                    TickOutcome::Completed
                } else {
                    self.state.advance_round();
                    self.state.enter_work();
                    self.notify(NotificationKind::WorkStarted);
                    TickOutcome::EnteredWork
                }
            }
            // Running always implies Work or Rest
            Phase::Idle => TickOutcome::Counted,
        }
    }

    /// Returns the signal raised whenever the timer enters Running.
    ///
    /// A tick driver waits on it to restart its one-second period, so the
    /// first tick after a start or resume always comes a full second later.
    pub fn started_signal(&self) -> Arc<Notify> {
        self.started.clone()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns a reference to the current run state.
    pub fn state(&self) -> &TimerRunState {
        &self.state
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &IntervalSettings {
        &self.state.settings
    }

    /// Returns a mutable reference to the run state (for testing).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn state_mut(&mut self) -> &mut TimerRunState {
        &mut self.state
    }

    fn invalid(&self, command: Command) -> EngineError {
        EngineError::InvalidTransition {
            command,
            status: self.state.status,
        }
    }

    fn notify(&self, kind: NotificationKind) {
        if let Err(e) = self.sink.notify(kind) {
            warn!("Notification {} failed: {}", kind.as_str(), e);
        }
    }

    fn emit(&self) -> TimerSnapshot {
        let snapshot = self.state.snapshot();
        if let Some(tx) = &self.snapshot_tx {
            if tx.send(snapshot).is_err() {
                debug!("Snapshot receiver dropped");
            }
        }
        snapshot
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("snapshot_channel", &self.snapshot_tx.is_some())
            .finish_non_exhaustive()
    }
}

fn rounds_label(settings: &IntervalSettings) -> String {
    if settings.is_infinite {
        "infinite rounds".to_string()
    } else {
        format!("{} rounds", settings.rounds)
    }
}

// ============================================================================
// Tests
// ============================================================================
