use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    features::navigation::toggle_folder,
    state::{
        AppMode, AppState, ChoicePurpose, ChoiceState, ErrorState, PromptPurpose, PromptState,
    },
};
use crate::domain::models::{Command as SavedCommand, FolderNode, Node};
use crate::domain::mutations::{ensure_unprotected, move_destinations};
use crate::infrastructure::files::EXPORT_FILE_NAME;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::RunSelected => match state.selected_node().cloned() {
            Some(Node::Command(c)) => UpdateResult::Handled(Some(Command::Run(c.command))),
            Some(Node::Folder(_)) => {
                toggle_folder(state);
                UpdateResult::Handled(None)
            }
            None => UpdateResult::Handled(None),
        },
        Action::CopySelected => match state.selected_node() {
            Some(Node::Command(c)) => {
                UpdateResult::Handled(Some(Command::Copy(c.command.clone())))
            }
            _ => UpdateResult::Handled(None),
        },
        Action::NewFolderIntent => {
            open_prompt(
                state,
                PromptPurpose::NewFolder,
                "Enter a name for the new folder",
                Some("e.g., \"Kubernetes Commands\""),
                None,
            );
            UpdateResult::Handled(None)
        }
        Action::RenameFolderIntent => {
            if let Some(Node::Folder(folder)) = state.selected_node().cloned() {
                if let Err(e) = ensure_unprotected(&folder, "renamed") {
                    state.set_error(ErrorState::error(e.to_string()));
                } else {
                    let name = folder.name.clone();
                    open_prompt(
                        state,
                        PromptPurpose::RenameFolder(folder),
                        "Enter a new name for the folder",
                        None,
                        Some(&name),
                    );
                }
            }
            UpdateResult::Handled(None)
        }
        Action::AddCommandIntent => {
            if let Some(folder) = target_folder(state) {
                open_prompt(
                    state,
                    PromptPurpose::NewCommandLabel(folder),
                    "Enter a label for the command",
                    Some("e.g., \"Git Status\""),
                    None,
                );
            }
            UpdateResult::Handled(None)
        }
        Action::EditCommandIntent => {
            if let Some(Node::Command(node)) = state.selected_node().cloned() {
                let label = node.label.clone();
                open_prompt(
                    state,
                    PromptPurpose::EditCommandLabel(node),
                    "Edit command label",
                    None,
                    Some(&label),
                );
            }
            UpdateResult::Handled(None)
        }
        Action::DeleteIntent => {
            match state.selected_node().cloned() {
                Some(Node::Folder(folder)) => {
                    if let Err(e) = ensure_unprotected(&folder, "deleted") {
                        state.set_error(ErrorState::error(e.to_string()));
                    } else {
                        let prompt = format!(
                            "Are you sure you want to delete the folder \"{}\" and all its commands?",
                            folder.name
                        );
                        open_choice(
                            state,
                            ChoiceState::confirm(ChoicePurpose::DeleteFolder(folder), prompt),
                        );
                    }
                }
                Some(Node::Command(node)) => {
                    let prompt = format!("Are you sure you want to delete \"{}\"?", node.label);
                    open_choice(
                        state,
                        ChoiceState::confirm(ChoicePurpose::DeleteCommand(node), prompt),
                    );
                }
                None => {}
            }
            UpdateResult::Handled(None)
        }
        Action::MoveToFolderIntent => {
            if let Some(Node::Command(node)) = state.selected_node().cloned() {
                let destinations = move_destinations(&state.folders, &node);
                if destinations.is_empty() {
                    state.set_status("No other folders available to move to.");
                } else {
                    let prompt = format!("Select a folder to move \"{}\" to", node.label);
                    let (indices, names): (Vec<usize>, Vec<String>) =
                        destinations.into_iter().unzip();
                    open_choice(
                        state,
                        ChoiceState {
                            purpose: ChoicePurpose::MoveCommand {
                                node,
                                destinations: indices,
                            },
                            prompt,
                            options: names,
                            selected: 0,
                        },
                    );
                }
            }
            UpdateResult::Handled(None)
        }
        Action::ExportIntent => {
            open_prompt(
                state,
                PromptPurpose::ExportPath,
                "Export commands to",
                None,
                Some(EXPORT_FILE_NAME),
            );
            UpdateResult::Handled(None)
        }
        Action::ImportIntent => {
            open_prompt(
                state,
                PromptPurpose::ImportPath,
                "Import commands from",
                Some("path to a JSON file"),
                None,
            );
            UpdateResult::Handled(None)
        }
        Action::Refresh | Action::ExternalChangeDetected => {
            UpdateResult::Handled(Some(Command::LoadTree))
        }
        Action::TextAreaInput(key) => {
            if let Some(prompt) = &mut state.prompt {
                prompt.text_area.input(*key);
            }
            UpdateResult::Handled(None)
        }
        Action::SubmitInput => UpdateResult::Handled(submit_input(state)),
        Action::ChoiceNext => {
            if let Some(choice) = &mut state.choice {
                choice.next();
            }
            UpdateResult::Handled(None)
        }
        Action::ChoicePrev => {
            if let Some(choice) = &mut state.choice {
                choice.prev();
            }
            UpdateResult::Handled(None)
        }
        Action::ChoiceSelect => UpdateResult::Handled(select_choice(state)),
        Action::ImportParsed(folders) => {
            open_choice(
                state,
                ChoiceState::confirm(
                    ChoicePurpose::ConfirmImport(folders.clone()),
                    "Are you sure you want to import? This will overwrite ALL current commands.",
                ),
            );
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// The selected folder, or the folder holding the selected command.
fn target_folder(state: &AppState) -> Option<FolderNode> {
    match state.selected_node()? {
        Node::Folder(folder) => Some(folder.clone()),
        Node::Command(c) => state
            .folders
            .get(c.folder_index)
            .map(|f| FolderNode::from_folder(f, c.folder_index)),
    }
}

fn open_prompt(
    state: &mut AppState,
    purpose: PromptPurpose,
    title: &str,
    placeholder: Option<&str>,
    initial: Option<&str>,
) {
    state.prompt = Some(PromptState::new(purpose, title, placeholder, initial));
    state.mode = AppMode::Input;
}

fn open_choice(state: &mut AppState, choice: ChoiceState) {
    state.choice = Some(choice);
    state.mode = AppMode::Choice;
}

fn close_modal(state: &mut AppState) {
    state.prompt = None;
    state.choice = None;
    state.mode = AppMode::Normal;
}

/// Empty names, labels and paths cancel; an empty command line is kept.
fn submit_input(state: &mut AppState) -> Option<Command> {
    let prompt = state.prompt.take()?;
    let raw = prompt.text_area.value();
    let value = raw.trim().to_string();
    close_modal(state);

    match prompt.purpose {
        PromptPurpose::NewFolder if !value.is_empty() => Some(Command::AddFolder(value)),
        PromptPurpose::RenameFolder(node) if !value.is_empty() => {
            Some(Command::RenameFolder(node, value))
        }
        PromptPurpose::NewCommandLabel(folder) if !value.is_empty() => {
            open_prompt(
                state,
                PromptPurpose::NewCommandText {
                    folder,
                    label: value,
                },
                "Enter the command to run",
                Some("e.g., \"git status\""),
                None,
            );
            None
        }
        PromptPurpose::NewCommandText { folder, label } => {
            Some(Command::AddCommand(folder, SavedCommand::new(label, raw)))
        }
        PromptPurpose::EditCommandLabel(node) if !value.is_empty() => {
            let current = node.command.clone();
            open_prompt(
                state,
                PromptPurpose::EditCommandText { node, label: value },
                "Edit command string",
                None,
                Some(&current),
            );
            None
        }
        PromptPurpose::EditCommandText { node, label } => {
            Some(Command::EditCommand(node, SavedCommand::new(label, raw)))
        }
        PromptPurpose::ExportPath if !value.is_empty() => Some(Command::Export(value)),
        PromptPurpose::ImportPath if !value.is_empty() => Some(Command::ReadImport(value)),
        _ => None,
    }
}

fn select_choice(state: &mut AppState) -> Option<Command> {
    let choice = state.choice.take()?;
    close_modal(state);
    let confirmed = choice.chosen() == Some("Yes");

    match choice.purpose {
        ChoicePurpose::DeleteFolder(node) if confirmed => Some(Command::DeleteFolder(node)),
        ChoicePurpose::DeleteCommand(node) if confirmed => Some(Command::DeleteCommand(node)),
        ChoicePurpose::ConfirmImport(folders) if confirmed => Some(Command::ReplaceAll(folders)),
        ChoicePurpose::MoveCommand { node, destinations } => destinations
            .get(choice.selected)
            .map(|dest| Command::MoveCommandTo(node, *dest)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Folder;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.set_folders(vec![
            Folder::with_commands("default", vec![SavedCommand::new("Status", "git status")]),
            Folder::new("work"),
        ]);
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            update(state, &Action::TextAreaInput(key));
        }
    }

    fn run(state: &mut AppState, action: Action) -> Option<Command> {
        match update(state, &action) {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => panic!("{action:?} not handled"),
        }
    }

    #[test]
    fn test_add_command_prompts_label_then_text() {
        let mut state = state();
        state.tree.list_state.select(Some(1)); // the "Status" command row

        run(&mut state, Action::AddCommandIntent);
        assert_eq!(state.mode, AppMode::Input);
        type_text(&mut state, "Log");
        assert_eq!(run(&mut state, Action::SubmitInput), None);
        assert!(matches!(
            state.prompt.as_ref().map(|p| &p.purpose),
            Some(PromptPurpose::NewCommandText { .. })
        ));

        // An empty command line is allowed.
        let cmd = run(&mut state, Action::SubmitInput);
        match cmd {
            Some(Command::AddCommand(folder, saved)) => {
                assert_eq!(folder.name, "default");
                assert_eq!(saved, SavedCommand::new("Log", ""));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_empty_folder_name_cancels() {
        let mut state = state();
        run(&mut state, Action::NewFolderIntent);
        type_text(&mut state, "   ");
        assert_eq!(run(&mut state, Action::SubmitInput), None);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.prompt.is_none());
    }

    #[test]
    fn test_default_folder_protected_before_prompting() {
        let mut state = state();
        run(&mut state, Action::RenameFolderIntent);
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(
            state.last_error.as_ref().unwrap().message,
            "The \"default\" folder cannot be renamed."
        );

        run(&mut state, Action::DeleteIntent);
        assert!(state.choice.is_none());
        assert!(state.last_error.unwrap().message.contains("cannot be deleted"));
    }

    #[test]
    fn test_delete_requires_yes() {
        let mut state = state();
        state.tree.list_state.select(Some(2));
        run(&mut state, Action::DeleteIntent);
        assert_eq!(state.mode, AppMode::Choice);
        assert_eq!(run(&mut state, Action::ChoiceSelect), None);

        run(&mut state, Action::DeleteIntent);
        run(&mut state, Action::ChoiceNext);
        let cmd = run(&mut state, Action::ChoiceSelect);
        assert!(matches!(cmd, Some(Command::DeleteFolder(f)) if f.name == "work"));
    }

    #[test]
    fn test_move_to_folder_lists_other_folders() {
        let mut state = state();
        state.tree.list_state.select(Some(1));
        run(&mut state, Action::MoveToFolderIntent);
        let choice = state.choice.clone().unwrap();
        assert_eq!(choice.options, vec!["work".to_string()]);

        let cmd = run(&mut state, Action::ChoiceSelect);
        assert!(matches!(cmd, Some(Command::MoveCommandTo(_, 1))));
    }

    #[test]
    fn test_move_to_folder_without_destinations() {
        let mut state = AppState::default();
        state.set_folders(vec![Folder::with_commands(
            "default",
            vec![SavedCommand::new("A", "a")],
        )]);
        state.tree.list_state.select(Some(1));
        run(&mut state, Action::MoveToFolderIntent);
        assert!(state.choice.is_none());
        assert_eq!(
            state.status_message.as_deref(),
            Some("No other folders available to move to.")
        );
    }

    #[test]
    fn test_export_prompt_is_prefilled() {
        let mut state = state();
        run(&mut state, Action::ExportIntent);
        let cmd = run(&mut state, Action::SubmitInput);
        assert_eq!(cmd, Some(Command::Export(EXPORT_FILE_NAME.to_string())));
    }

    #[test]
    fn test_import_needs_confirmation() {
        let mut state = state();
        let imported = vec![Folder::new("imported")];
        run(&mut state, Action::ImportParsed(imported.clone()));
        assert_eq!(state.mode, AppMode::Choice);
        run(&mut state, Action::ChoicePrev);
        let cmd = run(&mut state, Action::ChoiceSelect);
        assert_eq!(cmd, Some(Command::ReplaceAll(imported)));
    }

    #[test]
    fn test_run_and_copy_selected_command() {
        let mut state = state();
        state.tree.list_state.select(Some(1));
        assert_eq!(
            run(&mut state, Action::RunSelected),
            Some(Command::Run("git status".to_string()))
        );
        assert_eq!(
            run(&mut state, Action::CopySelected),
            Some(Command::Copy("git status".to_string()))
        );
    }
}
