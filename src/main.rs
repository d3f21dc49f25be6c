use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pomotui::cli::Args;
use pomotui::config::Settings;
use pomotui::events::TerminalEvents;
use pomotui::notify::DesktopNotifier;
use pomotui::paths::{self, DataPaths};
use pomotui::stats::SessionLog;
use pomotui::theme::ThemeProvider;
use pomotui::timer::{RunOutcome, TimerEngine};
use pomotui::ui::{stats_view, TerminalShell};

// ============================================================================
// Logging
// ============================================================================

/// The terminal belongs to the UI, so log lines go to a file. Logging is
/// skipped when the file cannot be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ============================================================================
// Main
// ============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data = DataPaths::new(args.data_dir.clone().unwrap_or_else(paths::default_data_dir));
    init_logging(&data.log_file());

    let mut settings = Settings::load(&paths::config_file());
    settings.apply_args(&args);
    let plan = settings.plan().context("Invalid configuration")?;

    let log = SessionLog::open(data.sessions_log()).context("Failed to open the session log")?;
    if let Some(backup) = log.quarantined() {
        eprintln!(
            "Warning: {} was unreadable and has been moved to {}; starting a fresh log.",
            log.path().display(),
            backup.display()
        );
    }

    let theme = ThemeProvider::new(settings.theme, settings.color).with_assets_dir(data.themes_dir());
    tracing::info!(
        work = settings.work_mins,
        short_break = settings.short_break_mins,
        long_break = settings.long_break_mins,
        cycles = settings.cycles,
        theme = settings.theme.as_str(),
        "starting"
    );

    let mut shell = TerminalShell::init(theme.color()).context("Failed to set up the terminal")?;
    let mut events = TerminalEvents::default();
    if let Err(e) = events.forward_interrupts() {
        tracing::warn!(error = %e, "signals will end the process without cleanup");
    }

    if args.stats {
        let result = stats_view::run(&mut shell, &mut events, &log);
        drop(shell);
        return result.context("Statistics view failed");
    }

    let notifier = DesktopNotifier::new(settings.sound_enabled);
    let mut engine = TimerEngine::new(plan, theme, log, shell, events, notifier);
    let outcome = engine.run();
    // Restores the terminal before anything is printed.
    drop(engine);

    match outcome.context("Timer stopped unexpectedly")? {
        RunOutcome::Finished => tracing::info!("finished"),
        RunOutcome::Quit => tracing::info!("quit by user"),
    }
    Ok(())
}
