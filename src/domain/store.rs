use crate::domain::models::{total_commands, Command, Folder, DEFAULT_FOLDER_NAME};
use crate::domain::settings::{SettingsBackend, FOLDERS_KEY};
use crate::error::{LauncherError, LauncherResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the canonical folder collection.
///
/// Every mutation goes through a full `load` followed by a full `save`;
/// the store never patches part of the persisted value.
#[derive(Clone)]
pub struct FolderStore {
    backend: Arc<dyn SettingsBackend>,
}

impl FolderStore {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn SettingsBackend> {
        &self.backend
    }

    /// Reads the collection and makes sure the default folder exists.
    ///
    /// The normalization happens in memory only; callers decide whether to
    /// write it back.
    pub async fn load(&self) -> LauncherResult<Vec<Folder>> {
        let raw = self
            .backend
            .get(FOLDERS_KEY)
            .await
            .map_err(LauncherError::persistence)?;
        Ok(ensure_default_folder(decode_folders(raw)))
    }

    pub async fn save(&self, folders: &[Folder]) -> LauncherResult<()> {
        let value = serde_json::to_value(folders).map_err(LauncherError::persistence)?;
        self.backend
            .update(FOLDERS_KEY, value)
            .await
            .map_err(LauncherError::persistence)?;
        info!(
            folders = folders.len(),
            commands = total_commands(folders),
            "saved folder collection"
        );
        Ok(())
    }
}

/// Decodes a persisted value. Anything that is not an array reads as empty.
/// Entries that cannot be read as a folder are dropped, and so are commands
/// that cannot be read inside an otherwise usable folder.
pub fn decode_folders(raw: Option<Value>) -> Vec<Folder> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| decode_folder(index, item))
        .collect()
}

fn decode_folder(index: usize, item: Value) -> Option<Folder> {
    let Value::Object(mut entry) = item else {
        warn!(index, "skipping folder entry that is not an object");
        return None;
    };
    let name = match entry.remove("name") {
        Some(Value::String(name)) => name,
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            warn!(index, "skipping folder entry with a non-string name: {other}");
            return None;
        }
    };
    let commands = match entry.remove("commands") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| match serde_json::from_value::<Command>(item) {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!(folder = index, position, "skipping malformed command entry: {e}");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            warn!(index, "ignoring folder commands that are not an array");
            Vec::new()
        }
    };
    Some(Folder::with_commands(name, commands))
}

/// Prepends an empty default folder when none exists. Later duplicates of
/// the default folder are folded into the first one, keeping their commands.
pub fn ensure_default_folder(mut folders: Vec<Folder>) -> Vec<Folder> {
    let positions: Vec<usize> = folders
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_default())
        .map(|(i, _)| i)
        .collect();

    let Some((&first, rest)) = positions.split_first() else {
        folders.insert(0, Folder::new(DEFAULT_FOLDER_NAME));
        return folders;
    };

    let mut extra: Vec<Folder> = rest.iter().rev().map(|&i| folders.remove(i)).collect();
    extra.reverse();
    for duplicate in extra {
        warn!("merging duplicate default folder");
        folders[first].commands.extend(duplicate.commands);
    }
    folders
}
