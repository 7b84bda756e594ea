use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

use favcmd::app::{
    context::AppContext,
    external::{InputGate, TerminalShell},
    persistence::{config_dir, get_config_path, AppConfig},
    r#loop::run_loop,
    state::AppState,
};
use favcmd::domain::{launcher::Launcher, store::FolderStore, tree::TreeNotifier};
use favcmd::infrastructure::{
    clipboard::SystemClipboard,
    settings_file::{JsonFileSettings, DEFAULT_SECTION},
};

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    let config_path = get_config_path();
    let config = config_path
        .as_deref()
        .map(AppConfig::load_from)
        .unwrap_or_default();

    if let Some(dir) = config_dir() {
        // Running without a log is fine; the TUI is the primary output.
        let _ = favcmd::logging::init(&dir.join("favcmd.log"));
    }

    let settings_path = config
        .settings_path(JsonFileSettings::default_path())
        .context("cannot locate the home directory; set FAVCMD_SETTINGS")?;
    info!(path = %settings_path.display(), "using settings file");

    // Load and normalize BEFORE terminal setup so a broken settings file
    // doesn't leave the terminal in raw mode.
    let backend = Arc::new(JsonFileSettings::new(settings_path, DEFAULT_SECTION));
    let launcher = Launcher::new(FolderStore::new(backend), TreeNotifier::new());
    launcher
        .initialize()
        .await
        .context("failed to load favorite commands")?;

    let gate = InputGate::new();
    let ctx = AppContext {
        launcher,
        clipboard: Arc::new(SystemClipboard::new()),
        executor: Arc::new(TerminalShell::new(config.shell(), gate.clone())),
        workdir: std::env::current_dir()?,
        config_path,
    };
    let app_state = AppState::new(config.palette());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, ctx, gate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "event loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}
