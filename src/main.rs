//! pomotui - A terminal Pomodoro timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - Pick a focus/rest interval preset (or bring your own)
//! - Optionally attach tasks to the session
//! - Focus and rest alternate until you stop, with a cue at each switch

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use pomotui::{try_create_player, App, DesktopNotifier, Preset, PresetCatalog, SoundPlayer};

// ============================================================================
// CLI Structure
// ============================================================================

/// pomotui - a terminal Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomotui",
    version,
    about = "A terminal Pomodoro timer with interval presets and task tracking",
    propagate_version = true
)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Focus interval in minutes for a custom preset (1-120)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    focus: Option<u32>,

    /// Rest interval in minutes for a custom preset (1-60)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    rest: Option<u32>,

    /// Replace the preset catalog with one loaded from a JSON file
    #[arg(short, long, value_name = "FILE")]
    presets: Option<PathBuf>,

    /// Disable the audio cue at phase transitions
    #[arg(long)]
    no_sound: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute
    if let Err(e) = execute_cli(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr; the TUI owns stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the parsed command line.
async fn execute_cli(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    // Everything fallible happens before the terminal is touched, so a bad
    // preset file fails with a readable message on a normal screen.
    let catalog = build_catalog(&cli)?;

    let sound = if cli.no_sound {
        None
    } else {
        try_create_player(false).map(|p| p as Arc<dyn SoundPlayer>)
    };
    let notifier = Arc::new(DesktopNotifier::new(sound));

    let mut app = App::new(catalog, notifier);
    run_tui(&mut app).await
}

/// Builds the preset catalog from the CLI flags.
///
/// A `--presets` file replaces the default catalog; `--focus`/`--rest`
/// prepend a custom preset on top of whichever catalog is in effect.
fn build_catalog(cli: &Cli) -> Result<PresetCatalog> {
    let mut presets = match &cli.presets {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading preset file {}", path.display()))?;
            serde_json::from_str::<Vec<Preset>>(&text)
                .with_context(|| format!("parsing preset file {}", path.display()))?
        }
        None => PresetCatalog::default().presets().to_vec(),
    };

    if cli.focus.is_some() || cli.rest.is_some() {
        let focus = cli.focus.unwrap_or(25);
        let rest = cli.rest.unwrap_or(5);
        presets.insert(
            0,
            Preset::new(format!("{focus}min focus / {rest}min rest"), focus, rest),
        );
    }

    PresetCatalog::new(presets).map_err(|e| anyhow::anyhow!("invalid preset catalog: {e}"))
}

/// Runs the app inside a raw-mode alternate screen, restoring the
/// terminal whether the app finished cleanly or not.
async fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode().context("enabling terminal raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("initializing terminal")?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode().context("disabling terminal raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leaving alternate screen")?;
    terminal.show_cursor().context("restoring cursor")?;

    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
