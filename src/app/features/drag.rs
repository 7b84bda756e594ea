use crate::app::{
    action::{Action, DropZone, UpdateResult},
    command::Command,
    state::{AppMode, AppState},
};
use crate::domain::models::Node;
use crate::domain::reorder::{begin_drag, plan_drop};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::GrabSelection => {
            let sources = state.tree.drag_sources();
            state.tree.marked.clear();
            if let Some(node) = begin_drag(&sources) {
                state.set_status(format!(
                    "Moving {node}: Enter drops on the selection, R on the root"
                ));
                state.dragging = Some(node);
                state.mode = AppMode::Move;
            }
            UpdateResult::Handled(None)
        }
        Action::DropOnSelected => {
            let target = state.selected_node().cloned();
            UpdateResult::Handled(finish_drop(state, target.as_ref()))
        }
        Action::DropOnRoot => UpdateResult::Handled(finish_drop(state, None)),
        Action::PointerDown(row) => {
            if state.mode == AppMode::Normal && *row < state.tree.rows.len() {
                state.tree.list_state.select(Some(*row));
                state.pointer_origin = Some(*row);
            }
            UpdateResult::Handled(None)
        }
        Action::PointerUp(zone) => UpdateResult::Handled(pointer_up(state, *zone)),
        _ => UpdateResult::NotHandled,
    }
}

fn finish_drop(state: &mut AppState, target: Option<&Node>) -> Option<Command> {
    let dragged = state.dragging.take()?;
    state.mode = AppMode::Normal;
    state.status_message = None;
    plan_drop(&dragged, target, &state.folders).map(Command::MoveItem)
}

/// A release on the row that was pressed is a plain click.
fn pointer_up(state: &mut AppState, zone: DropZone) -> Option<Command> {
    let origin = state.pointer_origin.take()?;
    let target = match zone {
        DropZone::Row(row) if row == origin => return None,
        DropZone::Row(row) => Some(state.tree.node_at(row)?.clone()),
        DropZone::Root => None,
        DropZone::Outside => return None,
    };

    let source = state.tree.node_at(origin)?.clone();
    let dragged = begin_drag(&[source])?;
    plan_drop(&dragged, target.as_ref(), &state.folders).map(Command::MoveItem)
}
