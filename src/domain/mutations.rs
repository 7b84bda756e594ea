//! Folder and command lifecycle edits over an in-memory snapshot.
//!
//! Each function validates the node it was handed against `folders` before
//! touching anything, so a failed call leaves the snapshot as it was.

use crate::domain::models::{Command, CommandNode, Folder, FolderNode};
use crate::domain::store::decode_folders;
use crate::error::{LauncherError, LauncherResult};
use serde_json::Value;

pub fn ensure_unprotected(node: &FolderNode, action: &'static str) -> LauncherResult<()> {
    if node.is_default {
        return Err(LauncherError::ProtectedFolder {
            name: node.name.clone(),
            action,
        });
    }
    Ok(())
}

/// Index of the folder `node` was built from, if it is still there.
pub(crate) fn resolve_folder(folders: &[Folder], node: &FolderNode) -> LauncherResult<usize> {
    match folders.get(node.folder_index) {
        Some(folder) if folder.name == node.name => Ok(node.folder_index),
        _ => Err(LauncherError::StaleNode),
    }
}

pub(crate) fn resolve_command(
    folders: &[Folder],
    node: &CommandNode,
) -> LauncherResult<(usize, usize)> {
    let found = folders
        .get(node.folder_index)
        .and_then(|f| f.commands.get(node.command_index));
    match found {
        Some(cmd) if cmd.label == node.label && cmd.command == node.command => {
            Ok((node.folder_index, node.command_index))
        }
        _ => Err(LauncherError::StaleNode),
    }
}

fn ensure_unique(folders: &[Folder], name: &str) -> LauncherResult<()> {
    if folders.iter().any(|f| f.name == name) {
        return Err(LauncherError::DuplicateFolder(name.to_string()));
    }
    Ok(())
}

pub fn add_folder(folders: &mut Vec<Folder>, name: &str) -> LauncherResult<()> {
    ensure_unique(folders, name)?;
    folders.push(Folder::new(name));
    Ok(())
}

/// Returns `false` when the name did not change.
pub fn rename_folder(
    folders: &mut [Folder],
    node: &FolderNode,
    new_name: &str,
) -> LauncherResult<bool> {
    ensure_unprotected(node, "renamed")?;
    if new_name == node.name {
        return Ok(false);
    }
    let index = resolve_folder(folders, node)?;
    ensure_unique(folders, new_name)?;
    folders[index].name = new_name.to_string();
    Ok(true)
}

pub fn delete_folder(folders: &mut Vec<Folder>, node: &FolderNode) -> LauncherResult<Folder> {
    ensure_unprotected(node, "deleted")?;
    let index = resolve_folder(folders, node)?;
    Ok(folders.remove(index))
}

pub fn add_command(
    folders: &mut [Folder],
    folder: &FolderNode,
    command: Command,
) -> LauncherResult<()> {
    let index = resolve_folder(folders, folder)?;
    folders[index].commands.push(command);
    Ok(())
}

pub fn edit_command(
    folders: &mut [Folder],
    node: &CommandNode,
    command: Command,
) -> LauncherResult<()> {
    let (fi, ci) = resolve_command(folders, node)?;
    folders[fi].commands[ci] = command;
    Ok(())
}

pub fn delete_command(folders: &mut [Folder], node: &CommandNode) -> LauncherResult<Command> {
    let (fi, ci) = resolve_command(folders, node)?;
    Ok(folders[fi].commands.remove(ci))
}

/// Moves a command to the end of the folder at `destination`.
pub fn move_command_to(
    folders: &mut [Folder],
    node: &CommandNode,
    destination: usize,
) -> LauncherResult<()> {
    let (fi, ci) = resolve_command(folders, node)?;
    if destination >= folders.len() {
        return Err(LauncherError::StaleNode);
    }
    let moved = folders[fi].commands.remove(ci);
    folders[destination].commands.push(moved);
    Ok(())
}

/// Folders a command can be moved to: every folder but its own.
pub fn move_destinations(folders: &[Folder], node: &CommandNode) -> Vec<(usize, String)> {
    folders
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != node.folder_index)
        .map(|(index, f)| (index, f.name.clone()))
        .collect()
}

pub fn export_json(folders: &[Folder]) -> LauncherResult<String> {
    serde_json::to_string_pretty(folders).map_err(|e| LauncherError::Format(e.to_string()))
}

/// Parses an export file.
///
/// The shape check is shallow: the document must be an array and, if it has
/// elements, the first one must carry `name` and `commands`. Past that check
/// entries are read the same lenient way as the stored collection.
pub fn parse_import(bytes: &[u8]) -> LauncherResult<Vec<Folder>> {
    const EXPECTED: &str = "Expected an array of folders.";

    let text = std::str::from_utf8(bytes)
        .map_err(|e| LauncherError::Format(format!("File is not UTF-8: {e}")))?;
    let value: Value =
        serde_json::from_str(text).map_err(|e| LauncherError::Format(e.to_string()))?;

    let Value::Array(items) = &value else {
        return Err(LauncherError::Format(EXPECTED.to_string()));
    };
    if let Some(first) = items.first() {
        let has_fields = first.get("name").is_some() && first.get("commands").is_some();
        if !has_fields {
            return Err(LauncherError::Format(EXPECTED.to_string()));
        }
    }

    Ok(decode_folders(Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::get_children;

    fn folders() -> Vec<Folder> {
        vec![
            Folder::with_commands("default", vec![Command::new("A", "a")]),
            Folder::with_commands("work", vec![Command::new("B", "b")]),
        ]
    }

    fn folder_node(folders: &[Folder], index: usize) -> FolderNode {
        FolderNode::from_folder(&folders[index], index)
    }

    fn command_node(folders: &[Folder], fi: usize, ci: usize) -> CommandNode {
        let c = &folders[fi].commands[ci];
        CommandNode {
            label: c.label.clone(),
            command: c.command.clone(),
            folder_index: fi,
            command_index: ci,
        }
    }

    #[test]
    fn test_add_command_to_default() {
        let mut folders = vec![Folder::new("default")];
        let node = get_children(&folders, None)[0].as_folder().unwrap().clone();

        add_command(&mut folders, &node, Command::new("Status", "git status")).unwrap();

        assert_eq!(
            folders,
            vec![Folder::with_commands(
                "default",
                vec![Command::new("Status", "git status")]
            )]
        );
    }

    #[test]
    fn test_default_folder_is_protected() {
        let mut folders = folders();
        let default = folder_node(&folders, 0);

        let err = rename_folder(&mut folders, &default, "other").unwrap_err();
        assert!(matches!(err, LauncherError::ProtectedFolder { action: "renamed", .. }));
        assert_eq!(err.to_string(), "The \"default\" folder cannot be renamed.");

        let err = delete_folder(&mut folders, &default).unwrap_err();
        assert!(matches!(err, LauncherError::ProtectedFolder { action: "deleted", .. }));
        assert_eq!(folders, self::folders());
    }

    #[test]
    fn test_rename_folder() {
        let mut folders = folders();
        let work = folder_node(&folders, 1);

        assert!(!rename_folder(&mut folders, &work, "work").unwrap());
        assert!(rename_folder(&mut folders, &work, "ops").unwrap());
        assert_eq!(folders[1].name, "ops");

        let stale = work;
        assert!(matches!(
            rename_folder(&mut folders, &stale, "again"),
            Err(LauncherError::StaleNode)
        ));
    }

    #[test]
    fn test_duplicate_folder_names_are_rejected() {
        let mut folders = folders();
        assert!(matches!(
            add_folder(&mut folders, "work"),
            Err(LauncherError::DuplicateFolder(_))
        ));
        add_folder(&mut folders, "ops").unwrap();
        assert_eq!(folders.last().unwrap().name, "ops");

        let ops = folder_node(&folders, 2);
        assert!(matches!(
            rename_folder(&mut folders, &ops, "default"),
            Err(LauncherError::DuplicateFolder(_))
        ));
    }

    #[test]
    fn test_delete_folder_removes_its_commands() {
        let mut folders = folders();
        let work = folder_node(&folders, 1);
        let removed = delete_folder(&mut folders, &work).unwrap();
        assert_eq!(removed.commands.len(), 1);
        assert_eq!(folders.len(), 1);
    }

    #[test]
    fn test_edit_and_delete_command() {
        let mut folders = folders();
        let node = command_node(&folders, 1, 0);

        edit_command(&mut folders, &node, Command::new("B2", "b --all")).unwrap();
        assert_eq!(folders[1].commands[0], Command::new("B2", "b --all"));

        // The old node no longer matches what is stored.
        assert!(matches!(
            delete_command(&mut folders, &node),
            Err(LauncherError::StaleNode)
        ));

        let fresh = command_node(&folders, 1, 0);
        delete_command(&mut folders, &fresh).unwrap();
        assert!(folders[1].commands.is_empty());
    }

    #[test]
    fn test_move_command_to_appends() {
        let mut folders = folders();
        let node = command_node(&folders, 0, 0);

        let destinations = move_destinations(&folders, &node);
        assert_eq!(destinations, vec![(1, "work".to_string())]);

        move_command_to(&mut folders, &node, 1).unwrap();
        assert!(folders[0].commands.is_empty());
        let labels: Vec<&str> = folders[1].commands.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = parse_import(br#"{"notAnArray": true}"#).unwrap_err();
        assert!(matches!(err, LauncherError::Format(_)));
        assert!(err.to_string().contains("Expected an array of folders."));
    }

    #[test]
    fn test_import_checks_first_element_only() {
        assert!(matches!(
            parse_import(br#"[{"name": "x"}]"#),
            Err(LauncherError::Format(_))
        ));
        assert!(matches!(parse_import(b"not json"), Err(LauncherError::Format(_))));

        let folders = parse_import(br#"[{"name": "x", "commands": []}, {"name": "y"}]"#).unwrap();
        assert_eq!(folders.len(), 2);
        assert!(folders[1].commands.is_empty());

        assert!(parse_import(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_keeps_readable_entries_past_the_first() {
        let folders = parse_import(br#"[{"name": "x", "commands": []}, 42]"#).unwrap();
        assert_eq!(folders, vec![Folder::new("x")]);

        let folders = parse_import(
            br#"[{"name": "x", "commands": [{"label": 1, "command": "ls"}, {"label": "L", "command": "ls"}]}]"#,
        )
        .unwrap();
        assert_eq!(folders, vec![Folder::with_commands("x", vec![Command::new("L", "ls")])]);
    }

    #[test]
    fn test_export_matches_import_format() {
        let folders = folders();
        let json = export_json(&folders).unwrap();
        assert!(json.contains("\n  {"));
        assert_eq!(parse_import(json.as_bytes()).unwrap(), folders);
    }
}
