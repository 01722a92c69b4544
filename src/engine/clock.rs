//! Tick sources and the driver loop.
//!
//! The engine never schedules itself. A [`Clock`] yields once per elapsed
//! second and [`drive`] forwards each tick to the engine:
//! - [`IntervalClock`]: a tokio interval for real time
//! - [`ManualClock`]: advanced by hand through a [`ClockHandle`], for tests

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::timer::{TickOutcome, TimerEngine};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Clock
// ============================================================================

/// Something that can wake the driver once per elapsed second.
pub trait Clock: Send {
    /// Waits for the next tick.
    ///
    /// Returns false once the source is exhausted and no more ticks will come.
    fn tick(&mut self) -> impl Future<Output = bool> + Send;

    /// Restarts the period so the next tick is a full period away.
    fn reset(&mut self);
}

/// Real-time clock backed by `tokio::time::interval`.
#[derive(Debug)]
pub struct IntervalClock {
    ticker: Interval,
}

impl IntervalClock {
    /// Creates a clock whose first tick fires one period from now.
    pub fn new(period: Duration) -> Self {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { ticker }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Clock for IntervalClock {
    async fn tick(&mut self) -> bool {
        self.ticker.tick().await;
        true
    }

    fn reset(&mut self) {
        self.ticker.reset();
    }
}

/// Clock that only ticks when told to.
#[derive(Debug)]
pub struct ManualClock {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Advances a [`ManualClock`]. Dropping every handle exhausts the clock
/// once the queued ticks are consumed.
#[derive(Debug, Clone)]
pub struct ClockHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualClock {
    /// Creates a clock together with the handle that drives it.
    pub fn new() -> (Self, ClockHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, ClockHandle { tx })
    }
}

impl ClockHandle {
    /// Queues `seconds` ticks.
    pub fn advance(&self, seconds: u32) {
        for _ in 0..seconds {
            if self.tx.send(()).is_err() {
                debug!("Manual clock dropped, discarding ticks");
                return;
            }
        }
    }
}

impl Clock for ManualClock {
    async fn tick(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    // Queued ticks stand for seconds that have already elapsed.
    fn reset(&mut self) {}
}

// ============================================================================
// Driver
// ============================================================================

/// Why [`drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// A finite workout ran to completion
    Completed,
    /// The clock stopped producing ticks
    ClockExhausted,
}

/// Forwards clock ticks to the engine until the workout completes or the
/// clock runs dry.
///
/// Ticks that arrive while the engine is stopped or paused are ignored by
/// the engine, so commands issued concurrently through the same mutex take
/// effect on the next tick. Each time the engine enters Running the clock
/// is reset, so counting restarts a full period after the start or resume.
pub async fn drive<C: Clock>(engine: Arc<Mutex<TimerEngine>>, mut clock: C) -> DriveOutcome {
    let started = engine.lock().await.started_signal();

    loop {
        tokio::select! {
            more = clock.tick() => {
                if !more {
                    debug!("Driver finished: clock exhausted");
                    return DriveOutcome::ClockExhausted;
                }
                let outcome = engine.lock().await.tick();
                if outcome == TickOutcome::Completed {
                    debug!("Driver finished: workout complete");
                    return DriveOutcome::Completed;
                }
            }
            _ = started.notified() => {
                debug!("Timer entered running, restarting tick period");
                clock.reset();
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
