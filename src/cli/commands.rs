//! Command definitions for the Interval Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::IntervalSettings;

// ============================================================================
// CLI Structure
// ============================================================================

/// Interval Timer CLI - work/rest interval training in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "interval-timer",
    version,
    about = "Interval workout timer",
    long_about = "Alternates work and rest intervals for a fixed or unlimited number of rounds,\n\
                  with an audible cue at every phase change and reusable presets.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preset file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub presets_file: Option<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a workout in the terminal
    Run(RunArgs),

    /// Manage saved presets
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Preset subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetAction {
    /// List saved presets
    List,

    /// Save a new preset
    Save(SavePresetArgs),

    /// Delete a preset by id
    Delete {
        /// Preset id (see `presets list`)
        id: String,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Load a saved preset by id or name
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Work duration in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Rest duration in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rest: Option<u32>,

    /// Number of rounds (makes an infinite preset finite)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Repeat rounds until stopped
    #[arg(short, long)]
    pub infinite: bool,

    /// Disable beeps
    #[arg(long)]
    pub no_sound: bool,
}

impl RunArgs {
    /// Applies explicit flags on top of `base`.
    ///
    /// An infinite base stays infinite unless `--rounds` is given without
    /// `--infinite`.
    pub fn apply_to(&self, base: IntervalSettings) -> IntervalSettings {
        IntervalSettings {
            work_seconds: self.work.unwrap_or(base.work_seconds),
            rest_seconds: self.rest.unwrap_or(base.rest_seconds),
            rounds: self.rounds.unwrap_or(base.rounds),
            is_infinite: self.infinite || (base.is_infinite && self.rounds.is_none()),
        }
    }
}

// ============================================================================
// Save Preset Arguments
// ============================================================================

/// Arguments for `presets save`
#[derive(Args, Debug, Clone)]
pub struct SavePresetArgs {
    /// Display name for the preset
    #[arg(value_parser = validate_preset_name)]
    pub name: String,

    /// Work duration in seconds
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
    pub work: u32,

    /// Rest duration in seconds
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub rest: u32,

    /// Number of rounds
    #[arg(short = 'n', long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,

    /// Repeat rounds until stopped
    #[arg(short, long)]
    pub infinite: bool,
}

impl SavePresetArgs {
    /// Returns the interval settings described by the flags.
    pub fn settings(&self) -> IntervalSettings {
        IntervalSettings::new(self.work, self.rest, self.rounds).with_infinite(self.infinite)
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a preset name.
///
/// - Must not be blank
/// - Must not exceed 100 characters
fn validate_preset_name(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("preset name must not be empty".to_string());
    }
    if s.chars().count() > 100 {
        return Err("preset name must be at most 100 characters".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
