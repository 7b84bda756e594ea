use crate::app::{action::Action, command::Command, context::AppContext, persistence::AppConfig};
use crate::domain::mutations::parse_import;
use crate::infrastructure::files::{read_bytes, resolve_export_path, resolve_path, write_bytes};
use anyhow::{Context, Result};
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{error, warn};

pub fn handle_command(command: Command, ctx: AppContext, tx: mpsc::Sender<Action>) -> Result<()> {
    let launcher = ctx.launcher;
    match command {
        Command::LoadTree => {
            tokio::spawn(async move {
                match launcher.folders().await {
                    Ok(folders) => {
                        let _ = tx.send(Action::TreeLoaded(folders)).await;
                    }
                    Err(e) => {
                        error!(error = %e, "failed to load folders");
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to load commands: {e}")))
                            .await;
                    }
                }
            });
        }
        Command::AddFolder(name) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Adding folder \"{name}\"..."),
                    format!("Added folder \"{name}\""),
                    move || async move { Ok(launcher.add_folder(&name).await?) },
                )
                .await;
            });
        }
        Command::RenameFolder(node, new_name) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Renaming \"{}\"...", node.name),
                    format!("Renamed folder to \"{new_name}\""),
                    move || async move {
                        launcher.rename_folder(&node, &new_name).await?;
                        Ok(())
                    },
                )
                .await;
            });
        }
        Command::DeleteFolder(node) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Deleting \"{}\"...", node.name),
                    format!("Deleted folder \"{}\"", node.name),
                    move || async move { Ok(launcher.delete_folder(&node).await?) },
                )
                .await;
            });
        }
        Command::AddCommand(folder, saved) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Adding \"{}\"...", saved.label),
                    format!("Added \"{}\" to \"{}\"", saved.label, folder.name),
                    move || async move { Ok(launcher.add_command(&folder, saved).await?) },
                )
                .await;
            });
        }
        Command::EditCommand(node, saved) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Updating \"{}\"...", node.label),
                    format!("Updated \"{}\"", saved.label),
                    move || async move { Ok(launcher.edit_command(&node, saved).await?) },
                )
                .await;
            });
        }
        Command::DeleteCommand(node) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Deleting \"{}\"...", node.label),
                    format!("Deleted \"{}\"", node.label),
                    move || async move { Ok(launcher.delete_command(&node).await?) },
                )
                .await;
            });
        }
        Command::MoveCommandTo(node, destination) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Moving \"{}\"...", node.label),
                    format!("Moved \"{}\"", node.label),
                    move || async move { Ok(launcher.move_command_to(&node, destination).await?) },
                )
                .await;
            });
        }
        Command::MoveItem(plan) => {
            // A drop onto a folder that vanished meanwhile is dropped silently.
            tokio::spawn(async move {
                match launcher.move_item(&plan).await {
                    Ok(true) => {
                        let _ = tx.send(Action::Notify(format!("Moved {}", plan.item))).await;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!(error = %e, item = %plan.item, "move failed");
                        let _ = tx.send(Action::ErrorOccurred(e.to_string())).await;
                    }
                }
            });
        }
        Command::Export(input) => {
            let path = resolve_export_path(&ctx.workdir, &input);
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Exporting to {}...", path.display()),
                    "Commands exported successfully!".to_string(),
                    move || async move {
                        let json = launcher.export_json().await?;
                        write_bytes(&path, json.as_bytes())
                            .await
                            .context("Failed to export commands")
                    },
                )
                .await;
            });
        }
        Command::ReadImport(input) => {
            let path = resolve_path(&ctx.workdir, &input);
            tokio::spawn(async move {
                let parsed = match read_bytes(&path).await {
                    Ok(bytes) => parse_import(&bytes).map_err(anyhow::Error::from),
                    Err(e) => Err(e),
                };
                let action = match parsed {
                    Ok(folders) => Action::ImportParsed(folders),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "import rejected");
                        Action::ErrorOccurred(format!("Failed to import commands: {e:#}"))
                    }
                };
                let _ = tx.send(action).await;
            });
        }
        Command::ReplaceAll(folders) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    "Importing...".to_string(),
                    "Commands imported successfully!".to_string(),
                    move || async move { Ok(launcher.replace_all(folders).await?) },
                )
                .await;
            });
        }
        Command::Copy(text) => {
            let clipboard = ctx.clipboard;
            tokio::spawn(async move {
                let copied = text.clone();
                let written = tokio::task::spawn_blocking(move || clipboard.write_text(&copied))
                    .await
                    .map_err(anyhow::Error::from)
                    .and_then(|result| result);
                let action = match written {
                    Ok(()) => Action::Notify(format!("Copied \"{text}\" to clipboard.")),
                    Err(e) => {
                        error!(error = %e, "clipboard write failed");
                        Action::ErrorOccurred(format!("Failed to copy to clipboard: {e}"))
                    }
                };
                let _ = tx.send(action).await;
            });
        }
        Command::SaveTheme(palette) => {
            if let Some(path) = ctx.config_path {
                tokio::spawn(async move {
                    let mut config = AppConfig::load_from(&path);
                    config.theme = Some(palette);
                    if let Err(e) = config.save_to(&path) {
                        warn!(error = %e, "failed to save theme");
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to save theme: {e:#}")))
                            .await;
                    }
                });
            }
        }
        // Needs the terminal, so the event loop runs it in the foreground.
        Command::Run(_) => {}
    }
    Ok(())
}

async fn run_operation<F, Fut>(
    tx: mpsc::Sender<Action>,
    start_msg: String,
    success_msg: String,
    action: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    let _ = tx.send(Action::OperationStarted(start_msg)).await;
    match action().await {
        Ok(()) => {
            let _ = tx.send(Action::OperationCompleted(Ok(success_msg))).await;
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "operation failed");
            let _ = tx.send(Action::OperationCompleted(Err(message))).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::{MockClipboardSink, MockExecutionSink};
    use crate::domain::launcher::Launcher;
    use crate::domain::models::{Command as SavedCommand, Folder, FolderNode};
    use crate::domain::settings::testing::{shared_backend, Persisted};
    use crate::domain::store::{decode_folders, FolderStore};
    use crate::domain::tree::TreeNotifier;
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context(initial: Option<Value>, workdir: &Path) -> (AppContext, Persisted) {
        let (backend, persisted) = shared_backend(initial);
        let launcher = Launcher::new(FolderStore::new(Arc::new(backend)), TreeNotifier::new());
        let ctx = AppContext {
            launcher,
            clipboard: Arc::new(MockClipboardSink::new()),
            executor: Arc::new(MockExecutionSink::new()),
            workdir: workdir.to_path_buf(),
            config_path: Some(workdir.join("config.toml")),
        };
        (ctx, persisted)
    }

    #[tokio::test]
    async fn test_protected_folder_error_reaches_state() {
        let dir = TempDir::new().unwrap();
        let (ctx, persisted) = context(None, dir.path());
        let (tx, mut rx) = mpsc::channel(4);
        let default = FolderNode::from_folder(&Folder::new("default"), 0);

        handle_command(Command::DeleteFolder(default), ctx, tx).unwrap();

        assert!(matches!(rx.recv().await, Some(Action::OperationStarted(_))));
        match rx.recv().await {
            Some(Action::OperationCompleted(Err(msg))) => {
                assert_eq!(msg, "The \"default\" folder cannot be deleted.");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(persisted.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_then_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let initial = json!([
            {"name": "default", "commands": [{"label": "Status", "command": "git status"}]}
        ]);
        let (ctx, _persisted) = context(Some(initial), dir.path());
        let (tx, mut rx) = mpsc::channel(4);

        handle_command(Command::Export("backup".to_string()), ctx.clone(), tx.clone()).unwrap();
        rx.recv().await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            Action::OperationCompleted(Ok("Commands exported successfully!".to_string()))
        );
        let written = std::fs::read_to_string(dir.path().join("backup.json")).unwrap();
        assert!(written.starts_with("[\n  {"));

        handle_command(Command::ReadImport("backup.json".to_string()), ctx, tx).unwrap();
        match rx.recv().await {
            Some(Action::ImportParsed(folders)) => {
                assert_eq!(folders[0].commands[0], SavedCommand::new("Status", "git status"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_import_of_wrong_shape_leaves_store_alone() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"{"notAnArray": true}"#).unwrap();
        let (ctx, persisted) = context(None, dir.path());
        let (tx, mut rx) = mpsc::channel(4);

        handle_command(Command::ReadImport("bad.json".to_string()), ctx, tx).unwrap();

        match rx.recv().await {
            Some(Action::ErrorOccurred(msg)) => {
                assert!(msg.starts_with("Failed to import commands:"));
                assert!(msg.contains("Expected an array of folders."));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(persisted.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_all_persists() {
        let dir = TempDir::new().unwrap();
        let (ctx, persisted) = context(None, dir.path());
        let (tx, mut rx) = mpsc::channel(4);

        handle_command(Command::ReplaceAll(vec![Folder::new("ops")]), ctx, tx).unwrap();
        rx.recv().await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            Action::OperationCompleted(Ok("Commands imported successfully!".to_string()))
        );
        let stored = decode_folders(persisted.lock().unwrap().clone());
        assert_eq!(stored, vec![Folder::new("ops")]);
    }

    #[tokio::test]
    async fn test_copy_reports_to_user() {
        let dir = TempDir::new().unwrap();
        let (mut ctx, _persisted) = context(None, dir.path());
        let mut clipboard = MockClipboardSink::new();
        clipboard
            .expect_write_text()
            .with(mockall::predicate::eq("git status"))
            .times(1)
            .returning(|_| Ok(()));
        ctx.clipboard = Arc::new(clipboard);
        let (tx, mut rx) = mpsc::channel(1);

        handle_command(Command::Copy("git status".to_string()), ctx, tx).unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            Action::Notify("Copied \"git status\" to clipboard.".to_string())
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_slow_clipboard_does_not_stall_the_runtime() {
        let dir = TempDir::new().unwrap();
        let (mut ctx, _persisted) = context(None, dir.path());
        let mut clipboard = MockClipboardSink::new();
        clipboard.expect_write_text().returning(|_| {
            std::thread::sleep(std::time::Duration::from_millis(300));
            Ok(())
        });
        ctx.clipboard = Arc::new(clipboard);
        let (tx, mut rx) = mpsc::channel(2);

        let ticker = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let _ = ticker.send(Action::Tick).await;
        });
        handle_command(Command::Copy("git status".to_string()), ctx, tx).unwrap();

        assert_eq!(rx.recv().await.unwrap(), Action::Tick);
        assert_eq!(
            rx.recv().await.unwrap(),
            Action::Notify("Copied \"git status\" to clipboard.".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_theme_writes_config() {
        let dir = TempDir::new().unwrap();
        let (ctx, _persisted) = context(None, dir.path());
        let path = ctx.config_path.clone().unwrap();
        let (tx, _rx) = mpsc::channel(1);

        handle_command(Command::SaveTheme(crate::theme::PaletteType::Nord), ctx, tx).unwrap();

        for _ in 0..100 {
            if AppConfig::load_from(&path).theme.is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(
            AppConfig::load_from(&path).theme,
            Some(crate::theme::PaletteType::Nord)
        );
    }
}
