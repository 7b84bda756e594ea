//! Drag-and-drop reordering of folders and commands.
//!
//! `move_item` is a pure function over a loaded snapshot. `begin_drag` and
//! `plan_drop` apply the drop policy that turns a gesture into the
//! `(item, target, new_index)` triple it expects.

use crate::domain::models::{Folder, FolderNode, Node};
use crate::domain::mutations::{resolve_command, resolve_folder};
use crate::error::{LauncherError, LauncherResult};
use tracing::debug;

/// A validated drop, ready to be applied with [`move_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub item: Node,
    pub target: Option<FolderNode>,
    pub new_index: usize,
}

/// Moves `item` to `new_index`, returning the new collection.
///
/// `new_index` is interpreted after the item has been extracted, and is
/// clamped to the length of the shortened sequence so that an index equal to
/// that length appends.
///
/// A command with a `target` lands in the folder with that name; without a
/// target it is reordered inside its own folder. A target name that no
/// longer exists yields `LauncherError::Lookup` and nothing is extracted.
/// A node that no longer matches `folders` yields `LauncherError::StaleNode`.
pub fn move_item(
    mut folders: Vec<Folder>,
    item: &Node,
    target: Option<&FolderNode>,
    new_index: usize,
) -> LauncherResult<Vec<Folder>> {
    match item {
        Node::Folder(node) => {
            let index = resolve_folder(&folders, node)?;
            let moved = folders.remove(index);
            let at = new_index.min(folders.len());
            folders.insert(at, moved);
        }
        Node::Command(node) => {
            let (source, command_index) = resolve_command(&folders, node)?;

            let destination = match target {
                Some(folder) => folders
                    .iter()
                    .position(|f| f.name == folder.name)
                    .ok_or_else(|| LauncherError::Lookup(folder.name.clone()))?,
                None => source,
            };

            let moved = folders[source].commands.remove(command_index);
            let commands = &mut folders[destination].commands;
            let at = new_index.min(commands.len());
            commands.insert(at, moved);
        }
    }
    Ok(folders)
}

/// Accepts a drag gesture. Only a single, non-default item can be dragged.
pub fn begin_drag(sources: &[Node]) -> Option<Node> {
    match sources {
        [Node::Folder(folder)] if folder.is_default => {
            debug!("rejected drag of the default folder");
            None
        }
        [single] => Some(single.clone()),
        [] => None,
        _ => {
            debug!(count = sources.len(), "rejected multi-item drag");
            None
        }
    }
}

/// Works out where a dragged node lands when released over `target`
/// (`None` is the root of the tree). Returns `None` for drops that have no
/// defined destination.
pub fn plan_drop(dragged: &Node, target: Option<&Node>, folders: &[Folder]) -> Option<MovePlan> {
    let plan = |target: Option<FolderNode>, new_index: usize| MovePlan {
        item: dragged.clone(),
        target,
        new_index,
    };

    match (dragged, target) {
        (Node::Command(_), Some(Node::Folder(folder))) => {
            Some(plan(Some(folder.clone()), folder.commands.len()))
        }
        (Node::Command(_), Some(Node::Command(cmd))) => {
            let parent = parent_folder_node(folders, cmd.folder_index)?;
            Some(plan(Some(parent), cmd.command_index))
        }
        (Node::Folder(_), Some(Node::Folder(folder))) => {
            Some(plan(Some(folder.clone()), folder.folder_index))
        }
        (Node::Folder(_), Some(Node::Command(cmd))) => {
            let parent = parent_folder_node(folders, cmd.folder_index)?;
            let index = parent.folder_index;
            Some(plan(Some(parent), index))
        }
        (Node::Folder(_), None) => Some(plan(None, folders.len())),
        (Node::Command(_), None) => {
            debug!("rejected drop of a command on the root");
            None
        }
    }
}

fn parent_folder_node(folders: &[Folder], folder_index: usize) -> Option<FolderNode> {
    folders
        .get(folder_index)
        .map(|f| FolderNode::from_folder(f, folder_index))
}
