//! CLI module for the Interval Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `session`: Interactive workout loop
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, PresetAction, RunArgs, SavePresetArgs};
pub use display::Display;
pub use session::{run_session, SessionCommand, SessionEnd};
