use crate::domain::models::{CommandNode, Folder, FolderNode, Node};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Children of `node` in the current collection. `None` is the root.
///
/// Nodes are rebuilt on every call; indices are only meaningful against the
/// `folders` snapshot passed in.
pub fn get_children(folders: &[Folder], node: Option<&Node>) -> Vec<Node> {
    match node {
        None => folders
            .iter()
            .enumerate()
            .map(|(index, folder)| Node::Folder(FolderNode::from_folder(folder, index)))
            .collect(),
        Some(Node::Folder(folder)) => folder
            .commands
            .iter()
            .enumerate()
            .map(|(index, cmd)| {
                Node::Command(CommandNode {
                    label: cmd.label.clone(),
                    command: cmd.command.clone(),
                    folder_index: folder.folder_index,
                    command_index: index,
                })
            })
            .collect(),
        Some(Node::Command(_)) => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node: Node,
    pub depth: u16,
    pub expanded: bool,
}

/// Visible rows, depth first. Folders named in `collapsed` hide their
/// commands.
pub fn flatten(folders: &[Folder], collapsed: &HashSet<String>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for folder in get_children(folders, None) {
        let expanded = !collapsed.contains(folder.label());
        let children = if expanded {
            get_children(folders, Some(&folder))
        } else {
            Vec::new()
        };
        rows.push(TreeRow {
            node: folder,
            depth: 0,
            expanded,
        });
        rows.extend(children.into_iter().map(|node| TreeRow {
            node,
            depth: 1,
            expanded: false,
        }));
    }
    rows
}

/// "Data changed" channel for whoever renders the tree.
///
/// Each notification bumps a generation counter; subscribers only care that
/// it moved, not by how much.
#[derive(Debug, Clone)]
pub struct TreeNotifier {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for TreeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn notify(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }
}
