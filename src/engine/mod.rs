//! Engine module for the Interval Timer.
//!
//! This module contains the core countdown functionality:
//! - `timer`: State machine with phase transitions and round counting
//! - `clock`: Injected tick sources and the driver loop
//! - `error`: Command errors

pub mod clock;
pub mod error;
pub mod timer;

pub use clock::{drive, Clock, ClockHandle, DriveOutcome, IntervalClock, ManualClock, TICK_PERIOD};
pub use error::{Command, EngineError};
pub use timer::{TickOutcome, TimerEngine};
