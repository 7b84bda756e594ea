use crate::app::{
    action::Action,
    command::Command,
    context::AppContext,
    external::InputGate,
    features::launcher::handle_command,
    input::map_event_to_action,
    reducer,
    state::AppState,
    ui,
};

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const WATCH_DEBOUNCE: Duration = Duration::from_millis(300);
const POLL_RATE: Duration = Duration::from_millis(100);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    ctx: AppContext,
    gate: InputGate,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        if event_tx.is_closed() {
            break;
        }
        // A foreground command owns stdin until it resumes the gate.
        if gate.is_paused() {
            std::thread::sleep(POLL_RATE);
            continue;
        }
        match event::poll(POLL_RATE) {
            Ok(false) => {}
            Ok(true) => match read_unless_paused(&gate, event::read) {
                // Paused while polling; the pending input belongs to the child.
                None => {}
                Some(Ok(evt)) => {
                    if event_tx.blocking_send(Ok(evt)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    let _ = event_tx.blocking_send(Err(e));
                    break;
                }
            },
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, ctx, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    ctx: AppContext,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Settings file watcher; kept alive for the whole loop
    let _watcher = match ctx.launcher.store().backend().location() {
        Some(path) => watch_settings(&path, action_tx.clone()),
        None => None,
    };

    // Reload the tree whenever a mutation lands
    let mut generations = ctx.launcher.notifier().subscribe();
    let refresh_tx = action_tx.clone();
    tokio::spawn(async move {
        while generations.changed().await.is_ok() {
            if refresh_tx.send(Action::Refresh).await.is_err() {
                break;
            }
        }
    });

    // Initial Load
    handle_command(Command::LoadTree, ctx.clone(), action_tx.clone())?;

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            res = event_rx.recv() => match res {
                Some(Ok(event)) => map_event_to_action(event, &app_state, terminal.size()?),
                Some(Err(e)) => return Err(e.into()),
                // Input source is gone; nothing more can reach us.
                None => break,
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        let Some(action) = action else {
            continue;
        };
        if let Action::Quit = action {
            break;
        }

        let command = reducer::update(&mut app_state, action);
        if app_state.should_quit {
            break;
        }

        match command {
            Some(Command::Run(line)) => {
                let outcome = run_in_foreground(&ctx, &line);
                terminal.clear()?;
                if let Some(action) = outcome {
                    let _ = action_tx.send(action).await;
                }
            }
            Some(other) => handle_command(other, ctx.clone(), action_tx.clone())?,
            None => {}
        }
    }

    Ok(())
}

fn read_unless_paused<F>(gate: &InputGate, read: F) -> Option<std::io::Result<Event>>
where
    F: FnOnce() -> std::io::Result<Event>,
{
    if gate.is_paused() {
        None
    } else {
        Some(read())
    }
}

/// Hands the terminal to the execution sink. Returns an action to report
/// failure, if any.
fn run_in_foreground(ctx: &AppContext, line: &str) -> Option<Action> {
    info!(command = %line, "running command");
    match ctx.executor.send(line) {
        Ok(true) => None,
        Ok(false) => Some(Action::ErrorOccurred(format!(
            "Command exited with an error: {line}"
        ))),
        Err(e) => {
            warn!(error = %e, "failed to run command");
            Some(Action::ErrorOccurred(format!("Failed to run command: {e:#}")))
        }
    }
}

/// Watches the directory holding the settings file, so edits that replace
/// the file are seen too. Missing directories and watcher errors are logged
/// and disable watching.
fn watch_settings(path: &Path, action_tx: mpsc::Sender<Action>) -> Option<RecommendedWatcher> {
    let dir = path.parent()?;
    let file_name = path.file_name()?.to_os_string();

    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
            {
                let _ = notify_tx.try_send(());
            }
        }
    });
    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            warn!(error = %e, "settings watcher unavailable");
            return None;
        }
    };
    if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
        debug!(dir = %dir.display(), error = %e, "not watching settings directory");
        return None;
    }

    tokio::spawn(async move {
        let mut pending = false;
        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(WATCH_DEBOUNCE) => {
                        if action_tx.send(Action::ExternalChangeDetected).await.is_err() {
                            break;
                        }
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    Some(watcher)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
