//! Interactive workout session.
//!
//! Wires a shared [`TimerEngine`] to a real-time clock, renders every
//! snapshot, and reads single-letter commands from stdin until the workout
//! completes or the user quits.

use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use super::display::Display;
use crate::engine::{drive, DriveOutcome, EngineError, IntervalClock, TimerEngine};
use crate::types::TimerSnapshot;

// ============================================================================
// SessionCommand
// ============================================================================

/// Commands typed during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown, or start again after a stop
    Resume,
    /// Stop and reset the workout
    Stop,
    /// Leave the session
    Quit,
}

impl SessionCommand {
    /// Parses one input line. Unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "p" | "pause" => Some(Self::Pause),
            "r" | "resume" | "start" => Some(Self::Resume),
            "s" | "stop" | "reset" => Some(Self::Stop),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Applies the command to the engine.
    ///
    /// `Quit` leaves the engine untouched.
    pub fn apply(&self, engine: &mut TimerEngine) -> Result<Option<TimerSnapshot>, EngineError> {
        match self {
            Self::Pause => engine.pause().map(Some),
            Self::Resume => engine.start().map(Some),
            Self::Stop => engine.reset().map(Some),
            Self::Quit => Ok(None),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The final round finished
    Completed,
    /// The user quit or pressed Ctrl-C
    Quit,
}

/// Runs a workout until it completes or the user quits.
///
/// `snapshots` must be the receiver of the channel attached to the engine
/// with [`TimerEngine::with_snapshot_channel`].
pub async fn run_session(
    engine: Arc<Mutex<TimerEngine>>,
    mut snapshots: mpsc::UnboundedReceiver<TimerSnapshot>,
) -> Result<SessionEnd> {
    engine
        .lock()
        .await
        .start()
        .context("failed to start the workout")?;

    let mut driver = tokio::spawn(drive(engine.clone(), IntervalClock::default()));
    let mut lines = spawn_stdin_reader();
    let mut stdin_open = true;

    let end = loop {
        tokio::select! {
            outcome = &mut driver => {
                let outcome = outcome.context("timer driver task failed")?;
                debug!("Driver returned {:?}", outcome);
                break match outcome {
                    DriveOutcome::Completed => SessionEnd::Completed,
                    DriveOutcome::ClockExhausted => SessionEnd::Quit,
                };
            }
            Some(snapshot) = snapshots.recv() => {
                Display::show_snapshot(&snapshot);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break SessionEnd::Quit;
            }
            line = lines.recv(), if stdin_open => {
                match line {
                    Some(line) => {
                        let Some(command) = SessionCommand::parse(&line) else {
                            if !line.trim().is_empty() {
                                Display::show_error(&format!("unknown command: {}", line.trim()));
                            }
                            continue;
                        };
                        if command == SessionCommand::Quit {
                            break SessionEnd::Quit;
                        }
                        if let Err(e) = command.apply(&mut *engine.lock().await) {
                            Display::show_error(&e.to_string());
                        }
                    }
                    None => {
                        debug!("stdin closed, continuing without input");
                        stdin_open = false;
                    }
                }
            }
        }
    };

    driver.abort();
    engine.lock().await.stop()?;
    let flushed = flush_snapshots(&mut snapshots);
    debug!("Rendered {} queued snapshots", flushed);

    if end == SessionEnd::Completed {
        Display::show_complete();
    }
    Ok(end)
}

/// Renders every snapshot already queued, returning how many there were.
fn flush_snapshots(snapshots: &mut mpsc::UnboundedReceiver<TimerSnapshot>) -> usize {
    let mut count = 0;
    while let Ok(snapshot) = snapshots.try_recv() {
        Display::show_snapshot(&snapshot);
        count += 1;
    }
    count
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown. The channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = thread::Builder::new()
        .name("interval-timer-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        debug!("Could not spawn stdin reader: {}", e);
    }
    rx
}
