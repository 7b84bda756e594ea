use crate::app::{
    action::{Action, UpdateResult},
    state::AppState,
};
use crate::domain::models::Node;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SelectNext => {
            move_selection(state, 1);
            UpdateResult::Handled(None)
        }
        Action::SelectPrev => {
            move_selection(state, -1);
            UpdateResult::Handled(None)
        }
        Action::SelectIndex(idx) => {
            if *idx < state.tree.rows.len() {
                state.tree.list_state.select(Some(*idx));
            }
            UpdateResult::Handled(None)
        }
        Action::ToggleFolder => {
            toggle_folder(state);
            UpdateResult::Handled(None)
        }
        Action::ToggleMark => {
            if let Some(idx) = state.tree.list_state.selected() {
                if !state.tree.marked.remove(&idx) {
                    state.tree.marked.insert(idx);
                }
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Moves the cursor by `delta` rows, wrapping at both ends.
fn move_selection(state: &mut AppState, delta: isize) {
    let len = state.tree.rows.len();
    if len == 0 {
        state.tree.list_state.select(None);
        return;
    }
    let next = match state.tree.list_state.selected() {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    };
    state.tree.list_state.select(Some(next));
}

/// Collapses or expands the selected folder. On a command row this
/// collapses its folder and moves the cursor onto it.
pub(crate) fn toggle_folder(state: &mut AppState) {
    let Some(node) = state.selected_node() else {
        return;
    };
    let (name, folder_index) = match node {
        Node::Folder(f) => (f.name.clone(), f.folder_index),
        Node::Command(c) => match state.folders.get(c.folder_index) {
            Some(f) => (f.name.clone(), c.folder_index),
            None => return,
        },
    };

    if !state.tree.collapsed.remove(&name) {
        state.tree.collapsed.insert(name);
    }
    let folders = std::mem::take(&mut state.folders);
    state.set_folders(folders);
    if let Some(row) = state.tree.folder_row(folder_index) {
        state.tree.list_state.select(Some(row));
    }
}
