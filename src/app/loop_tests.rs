use super::*;
use crate::app::state::{AppMode, AppState};
use crate::domain::host::{MockClipboardSink, MockExecutionSink};
use crate::domain::launcher::Launcher;
use crate::domain::models::{Command as SavedCommand, Folder};
use crate::domain::settings::testing::{shared_backend, Persisted};
use crate::domain::store::{decode_folders, ensure_default_folder, FolderStore};
use crate::domain::tree::TreeNotifier;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

fn context(
    initial: Option<Value>,
    workdir: &Path,
    executor: MockExecutionSink,
) -> (AppContext, Persisted) {
    let (backend, persisted) = shared_backend(initial);
    let mut clipboard = MockClipboardSink::new();
    clipboard.expect_write_text().returning(|_| Ok(()));
    let ctx = AppContext {
        launcher: Launcher::new(FolderStore::new(Arc::new(backend)), TreeNotifier::new()),
        clipboard: Arc::new(clipboard),
        executor: Arc::new(executor),
        workdir: workdir.to_path_buf(),
        config_path: Some(workdir.join("config.toml")),
    };
    (ctx, persisted)
}

fn key(code: KeyCode) -> Result<Event, std::io::Error> {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

#[tokio::test]
async fn test_failed_operation_reaches_state() {
    let dir = TempDir::new().unwrap();
    let (ctx, _persisted) = context(None, dir.path(), MockExecutionSink::new());
    let (tx, mut rx) = mpsc::channel(2);
    let mut state = AppState::default();

    handle_command(Command::AddFolder("default".to_string()), ctx, tx).unwrap();

    // 1. OperationStarted
    let started = rx.recv().await.unwrap();
    reducer::update(&mut state, started);
    assert_eq!(state.active_tasks.len(), 1);

    // 2. OperationCompleted(Err)
    let completed = rx.recv().await.unwrap();
    reducer::update(&mut state, completed);
    assert!(state.active_tasks.is_empty());
    assert_eq!(state.mode, AppMode::Normal);
    let error = state.last_error.expect("error toast");
    assert!(error.message.contains("default"));
}

#[tokio::test]
async fn test_enter_runs_selected_command_in_foreground() {
    let dir = TempDir::new().unwrap();
    let initial = json!([
        {"name": "default", "commands": [{"label": "Status", "command": "git status"}]}
    ]);
    let mut executor = MockExecutionSink::new();
    executor
        .expect_send()
        .with(mockall::predicate::eq("git status"))
        .times(1)
        .returning(|_| Ok(true));
    let (ctx, _persisted) = context(Some(initial), dir.path(), executor);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    let (event_tx, event_rx) = mpsc::channel(10);
    let driver = tokio::spawn(async move {
        // Let the initial load land before navigating.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        for event in [key(KeyCode::Down), key(KeyCode::Enter), key(KeyCode::Char('q'))] {
            event_tx.send(event).await.unwrap();
        }
    });

    tokio::time::timeout(
        std::time::Duration::from_secs(10),
        run_loop_with_events(&mut terminal, AppState::default(), ctx, event_rx),
    )
    .await
    .expect("loop finished")
    .unwrap();
    driver.await.unwrap();
}

#[tokio::test]
async fn test_new_folder_through_the_loop() {
    let dir = TempDir::new().unwrap();
    let (ctx, persisted) = context(None, dir.path(), MockExecutionSink::new());
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    let (event_tx, event_rx) = mpsc::channel(20);
    let driver = tokio::spawn(async move {
        let mut events = vec![key(KeyCode::Char('N'))];
        events.extend("ops".chars().map(|c| key(KeyCode::Char(c))));
        events.push(key(KeyCode::Enter));
        for event in events {
            event_tx.send(event).await.unwrap();
        }
        // Give the spawned save time to finish, then quit.
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        event_tx.send(key(KeyCode::Char('q'))).await.unwrap();
    });

    tokio::time::timeout(
        std::time::Duration::from_secs(10),
        run_loop_with_events(&mut terminal, AppState::default(), ctx, event_rx),
    )
    .await
    .expect("loop finished")
    .unwrap();
    driver.await.unwrap();

    let stored = decode_folders(persisted.lock().unwrap().clone());
    assert_eq!(
        stored.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["default", "ops"]
    );
}

#[test]
fn test_reader_leaves_input_alone_once_paused() {
    let gate = InputGate::default();
    gate.pause();
    let mut read_called = false;
    let outcome = read_unless_paused(&gate, || {
        read_called = true;
        key(KeyCode::Enter)
    });
    assert!(outcome.is_none());
    assert!(!read_called);

    gate.resume();
    assert!(matches!(
        read_unless_paused(&gate, || key(KeyCode::Enter)),
        Some(Ok(Event::Key(_)))
    ));
}

#[tokio::test]
async fn test_loop_ends_when_input_closes() {
    let dir = TempDir::new().unwrap();
    let (ctx, _persisted) = context(None, dir.path(), MockExecutionSink::new());
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    let (event_tx, event_rx) = mpsc::channel::<Result<Event, std::io::Error>>(1);
    drop(event_tx);

    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        run_loop_with_events(&mut terminal, AppState::default(), ctx, event_rx),
    )
    .await
    .expect("loop finished")
    .unwrap();
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let dir = TempDir::new().unwrap();
    let initial = json!([
        {"name": "default", "commands": [
            {"label": "Status", "command": "git status"},
            {"label": "Log", "command": "git log"}
        ]},
        {"name": "docker", "commands": [{"label": "PS", "command": "docker ps"}]},
        {"name": "empty", "commands": []}
    ]);
    let mut executor = MockExecutionSink::new();
    executor.expect_send().returning(|_| Ok(true));
    let (ctx, persisted) = context(Some(initial), dir.path(), executor);

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let app_state = AppState::default();

    let (event_tx, event_rx) = mpsc::channel(100);

    // Spawn a task to feed random events
    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=25 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            // Yield to allow the loop to process events
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Back out of any prompt, then quit. Dropping the sender ends the
        // loop as well if a modal swallowed the keys.
        for code in [KeyCode::Esc, KeyCode::Esc, KeyCode::Char('q')] {
            let _ = event_tx.send(key(code)).await;
        }
    });

    // Run the real loop (with a test backend)
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, app_state, ctx, event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();

    // Whatever happened, the collection still loads well formed.
    let stored = persisted.lock().unwrap().clone();
    let folders: Vec<Folder> = ensure_default_folder(decode_folders(stored));
    assert_eq!(folders.iter().filter(|f| f.is_default()).count(), 1);
    let all: Vec<&SavedCommand> = folders.iter().flat_map(|f| &f.commands).collect();
    assert!(all.iter().all(|c| !c.label.is_empty()));
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::F(5),
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            // Path separators and `~` would let typed export paths escape
            // the temp directory.
            let mut c = rng.gen_range(b' '..=b'}') as char;
            if matches!(c, '/' | '\\') {
                c = '_';
            }
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..6) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Up(MouseButton::Left),
        2 => MouseEventKind::Drag(MouseButton::Left),
        3 => MouseEventKind::ScrollUp,
        4 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}
