//! Interval Timer CLI - work/rest interval training in the terminal
//!
//! Runs workouts such as Tabata (20s work, 10s rest, 8 rounds):
//! - Alternating work and rest phases with an audible cue at each change
//! - Finite or infinite rounds
//! - Named presets stored in the user's config directory

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::{mpsc, Mutex};

use interval_timer::cli::{run_session, Cli, Commands, Display, PresetAction, RunArgs};
use interval_timer::{
    find_preset, seed_defaults_if_new, try_create_sink, AppSettings, JsonFilePresetStore,
    LogSink, NotificationSink, PresetStore, TimerConfig, TimerEngine,
};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let settings_path = cli.config.clone().unwrap_or_else(AppSettings::default_path);
    let settings = AppSettings::load(&settings_path)?;
    let presets_path = settings.presets_path(cli.presets_file.as_deref());
    tracing::debug!("Using presets at {}", presets_path.display());

    match cli.command {
        Some(Commands::Run(args)) => {
            let mut store = JsonFilePresetStore::new(presets_path);
            run_workout(&args, &settings, &mut store).await?;
        }
        Some(Commands::Presets { action }) => {
            let mut store = JsonFilePresetStore::new(presets_path);
            manage_presets(action, &mut store)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Resolves the workout settings and runs an interactive session.
async fn run_workout(
    args: &RunArgs,
    settings: &AppSettings,
    store: &mut JsonFilePresetStore,
) -> Result<()> {
    let (name, base) = match &args.preset {
        Some(key) => {
            seed_defaults_if_new(store)?;
            let preset = find_preset(store, key)?
                .ok_or_else(|| anyhow!("no preset with id or name '{}'", key))?;
            (Some(preset.name), preset.settings)
        }
        None => (None, settings.default_settings),
    };

    let interval_settings = args.apply_to(base);

    let sink: Arc<dyn NotificationSink> = if args.no_sound || !settings.sound {
        Arc::new(LogSink)
    } else {
        try_create_sink()
    };

    let mut engine = TimerEngine::new(base, sink);
    engine
        .load_config(interval_settings)
        .context("invalid workout configuration")?;
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = engine.with_snapshot_channel(tx);

    Display::show_workout_summary(name.as_deref(), &interval_settings);
    run_session(Arc::new(Mutex::new(engine)), rx).await?;
    Ok(())
}

/// Executes a preset subcommand.
fn manage_presets(action: PresetAction, store: &mut JsonFilePresetStore) -> Result<()> {
    match action {
        PresetAction::List => {
            seed_defaults_if_new(store)?;
            Display::show_presets(&store.list_all()?);
        }
        PresetAction::Save(args) => {
            seed_defaults_if_new(store)?;
            let saved = store.save(TimerConfig::new(args.name.clone(), args.settings()))?;
            Display::show_preset_saved(&saved);
        }
        PresetAction::Delete { id } => {
            seed_defaults_if_new(store)?;
            store.delete(&id)?;
            Display::show_preset_deleted(&id);
        }
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
