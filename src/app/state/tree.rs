use crate::domain::models::{Folder, Node};
use crate::domain::tree::{flatten, TreeRow};
use ratatui::widgets::ListState;
use std::collections::HashSet;

/// What the tree panel shows for the last loaded snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeState {
    pub rows: Vec<TreeRow>,
    pub list_state: ListState,
    /// Folder names whose commands are hidden.
    pub collapsed: HashSet<String>,
    /// Row indices marked with Space. Cleared on every rebuild since the
    /// rows they point at are rebuilt too.
    pub marked: HashSet<usize>,
}

impl TreeState {
    pub fn rebuild(&mut self, folders: &[Folder]) {
        self.collapsed
            .retain(|name| folders.iter().any(|f| &f.name == name));
        self.rows = flatten(folders, &self.collapsed);
        self.marked.clear();

        let selected = match (self.list_state.selected(), self.rows.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.list_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| &row.node)
    }

    #[must_use]
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.rows.get(index).map(|row| &row.node)
    }

    /// Marked nodes, or the selected one when nothing is marked.
    #[must_use]
    pub fn drag_sources(&self) -> Vec<Node> {
        if self.marked.is_empty() {
            return self.selected_node().cloned().into_iter().collect();
        }
        let mut indices: Vec<usize> = self.marked.iter().copied().collect();
        indices.sort_unstable();
        indices
            .into_iter()
            .filter_map(|i| self.node_at(i).cloned())
            .collect()
    }

    /// Row of the folder at `folder_index`.
    #[must_use]
    pub fn folder_row(&self, folder_index: usize) -> Option<usize> {
        self.rows.iter().position(
            |row| matches!(&row.node, Node::Folder(f) if f.folder_index == folder_index),
        )
    }
}
