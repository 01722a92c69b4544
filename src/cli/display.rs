//! Display utilities for the Interval Timer CLI.
//!
//! This module provides formatted output for:
//! - Live countdown lines
//! - Workout summaries
//! - Preset listings
//! - Error messages

use crate::types::{format_clock, IntervalSettings, Phase, Status, TimerConfig, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the workout about to run.
    pub fn show_workout_summary(name: Option<&str>, settings: &IntervalSettings) {
        if let Some(name) = name {
            println!("* {}", name);
        }
        println!("  {}", Self::describe_settings(settings));
        println!("  Total time: {}", Self::total_time(settings));
        println!("  Controls: [p] pause  [r] resume  [s] stop  [q] quit");
    }

    /// Shows one snapshot.
    pub fn show_snapshot(snapshot: &TimerSnapshot) {
        println!("{}", Self::render_snapshot(snapshot));
    }

    /// Shows the end-of-workout message.
    pub fn show_complete() {
        println!("* Workout complete!");
    }

    /// Shows the saved presets.
    pub fn show_presets(presets: &[TimerConfig]) {
        if presets.is_empty() {
            println!("No presets saved yet.");
            return;
        }
        println!("Presets");
        println!("─────────────────────────────");
        for preset in presets {
            println!("{}", Self::render_preset(preset));
        }
    }

    /// Shows a success message for a saved preset.
    pub fn show_preset_saved(preset: &TimerConfig) {
        println!("* Saved preset '{}' ({})", preset.name, preset.id);
        println!("  {}", Self::describe_settings(&preset.settings));
    }

    /// Shows a success message for a deleted preset.
    pub fn show_preset_deleted(id: &str) {
        println!("* Deleted preset {}", id);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Renders a snapshot as one status line.
    pub fn render_snapshot(snapshot: &TimerSnapshot) -> String {
        match snapshot.status {
            Status::Stopped => format!(
                "[] STOPPED  {}  {}",
                format_clock(u64::from(snapshot.seconds_remaining)),
                Self::rounds_text(snapshot)
            ),
            Status::Running | Status::Paused => {
                let marker = if snapshot.status == Status::Paused {
                    "||"
                } else {
                    "> "
                };
                let mut line = format!(
                    "{} {:<5}  {}  Round {}  interval {:>3.0}%",
                    marker,
                    Self::phase_label(snapshot.phase),
                    format_clock(u64::from(snapshot.seconds_remaining)),
                    Self::round_of(snapshot),
                    snapshot.interval_progress()
                );
                if let Some(progress) = snapshot.round_progress() {
                    line.push_str(&format!("  workout {:>3.0}%", progress));
                }
                line
            }
        }
    }

    /// Renders one preset row.
    pub fn render_preset(preset: &TimerConfig) -> String {
        format!(
            "{:<20} {}  ({})",
            preset.name,
            Self::describe_settings(&preset.settings),
            preset.id
        )
    }

    /// Describes work/rest/rounds in one phrase.
    pub fn describe_settings(settings: &IntervalSettings) -> String {
        let rounds = if settings.is_infinite {
            "∞ rounds".to_string()
        } else {
            format!("{} rounds", settings.rounds)
        };
        format!(
            "{}s work, {}s rest, {}",
            settings.work_seconds, settings.rest_seconds, rounds
        )
    }

    /// Total workout length, or `∞` in infinite mode.
    pub fn total_time(settings: &IntervalSettings) -> String {
        settings
            .total_workout_seconds()
            .map(format_clock)
            .unwrap_or_else(|| "∞".to_string())
    }

    fn phase_label(phase: Phase) -> &'static str {
        match phase {
            Phase::Idle => "IDLE",
            Phase::Work => "WORK",
            Phase::Rest => "REST",
        }
    }

    fn round_of(snapshot: &TimerSnapshot) -> String {
        if snapshot.is_infinite {
            format!("{} of ∞", snapshot.current_round)
        } else {
            format!("{} of {}", snapshot.current_round, snapshot.rounds)
        }
    }

    fn rounds_text(snapshot: &TimerSnapshot) -> String {
        if snapshot.is_infinite {
            "∞ rounds".to_string()
        } else {
            format!("{} rounds", snapshot.rounds)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerRunState;

    fn snapshot(settings: IntervalSettings) -> TimerSnapshot {
        let mut state = TimerRunState::new(settings);
        state.begin();
        state.snapshot()
    }

    mod render_snapshot_tests {
        use super::*;

        #[test]
        fn test_running_work() {
            let mut snap = snapshot(IntervalSettings::new(20, 10, 8));
            snap.seconds_remaining = 15;

            let line = Display::render_snapshot(&snap);

            assert!(line.starts_with("> "));
            assert!(line.contains("WORK"));
            assert!(line.contains("00:15"));
            assert!(line.contains("Round 1 of 8"));
            assert!(line.contains("25%"));
            assert!(line.contains("workout   0%"));
        }

        #[test]
        fn test_paused_rest() {
            let mut state = TimerRunState::new(IntervalSettings::new(20, 10, 8));
            state.begin();
            state.enter_rest();
            state.pause();

            let line = Display::render_snapshot(&state.snapshot());

            assert!(line.starts_with("||"));
            assert!(line.contains("REST"));
            assert!(line.contains("00:10"));
        }

        #[test]
        fn test_infinite_has_no_workout_progress() {
            let snap = snapshot(IntervalSettings::new(40, 20, 1).with_infinite(true));

            let line = Display::render_snapshot(&snap);

            assert!(line.contains("Round 1 of ∞"));
            assert!(!line.contains("workout"));
        }

        #[test]
        fn test_stopped() {
            let state = TimerRunState::new(IntervalSettings::new(20, 10, 8));
            let line = Display::render_snapshot(&state.snapshot());
            assert_eq!(line, "[] STOPPED  00:20  8 rounds");
        }
    }

    mod preset_rendering_tests {
        use super::*;

        #[test]
        fn test_describe_settings() {
            assert_eq!(
                Display::describe_settings(&IntervalSettings::new(20, 10, 8)),
                "20s work, 10s rest, 8 rounds"
            );
            assert_eq!(
                Display::describe_settings(&IntervalSettings::new(40, 20, 1).with_infinite(true)),
                "40s work, 20s rest, ∞ rounds"
            );
        }

        #[test]
        fn test_total_time() {
            assert_eq!(Display::total_time(&IntervalSettings::new(20, 10, 8)), "04:00");
            assert_eq!(
                Display::total_time(&IntervalSettings::new(20, 10, 8).with_infinite(true)),
                "∞"
            );
        }

        #[test]
        fn test_render_preset() {
            let preset =
                TimerConfig::with_id("default-tabata", "Tabata", IntervalSettings::new(20, 10, 8));
            let row = Display::render_preset(&preset);
            assert!(row.starts_with("Tabata"));
            assert!(row.contains("20s work, 10s rest, 8 rounds"));
            assert!(row.ends_with("(default-tabata)"));
        }
    }
}
