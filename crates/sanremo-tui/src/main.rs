// FantaSanremo league manager entry point.
//
// Startup sequence:
// 1. Load config
// 2. Initialize tracing (log to file, not terminal)
// 3. Open the SQLite snapshot store
// 4. Load the league (restore, create fresh, or recover from corruption)
// 5. Run the TUI until the user quits

use std::path::Path;

use anyhow::Context;
use tracing::{error, info, warn};

use sanremo_core::config;
use sanremo_core::db::SqliteStore;
use sanremo_core::league::snapshot::SNAPSHOT_KEY;
use sanremo_core::league::{LeagueStore, LoadOutcome};
use sanremo_tui::app::App;
use sanremo_tui::tui;

fn main() -> anyhow::Result<()> {
    // 1. Load config (before tracing, which takes its filter from it)
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.log_filter)?;
    info!("FantaSanremo starting up (league: {})", config.league_name);

    // 3. Open database
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data directory {}", parent.display()))?;
        }
    }
    let db = SqliteStore::open(&config.db_path).context("failed to open database")?;
    info!("Database opened at {}", config.db_path);
    match db.updated_at(SNAPSHOT_KEY) {
        Ok(Some(saved_at)) => info!("Last save: {}", saved_at),
        Ok(None) => {}
        Err(e) => warn!("Could not read last save time: {:#}", e),
    }

    // 4. Load league state
    let (store, outcome) = LeagueStore::load(db).context("failed to load league")?;
    match outcome {
        LoadOutcome::Restored => info!("League restored from previous session"),
        LoadOutcome::Fresh => info!("Starting a fresh league"),
        LoadOutcome::Recovered => warn!("Stored league was unreadable; started from defaults"),
    }

    // 5. Run the TUI (blocking until the user quits)
    let mut app = App::new(config, store);
    if let Err(e) = tui::run(&mut app) {
        error!("TUI error: {:#}", e);
        return Err(e);
    }

    info!("FantaSanremo shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
///
/// `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("fantasanremo.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
