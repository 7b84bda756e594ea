use crate::app::{
    action::{Action, DropZone},
    state::{AppMode, AppState},
    ui,
};
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect, Size};

/// Where a mouse position falls relative to the command tree.
pub fn resolve_drop_zone(
    app_state: &AppState<'_>,
    tree_inner: Rect,
    column: u16,
    row: u16,
) -> DropZone {
    if !tree_inner.contains(Position::new(column, row)) {
        return DropZone::Outside;
    }
    let index = app_state.tree.list_state.offset() + usize::from(row - tree_inner.y);
    if index < app_state.tree.rows.len() {
        DropZone::Row(index)
    } else {
        DropZone::Root
    }
}

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }
    if let Event::Resize(w, h) = event {
        return Some(Action::Resize(w, h));
    }

    match app_state.mode {
        AppMode::Input => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Enter => Some(Action::SubmitInput),
                _ => Some(Action::TextAreaInput(key)),
            },
            _ => None,
        },
        AppMode::Choice => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                    Some(Action::ChoiceNext)
                }
                KeyCode::Char('k') | KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
                    Some(Action::ChoicePrev)
                }
                KeyCode::Enter => Some(Action::ChoiceSelect),
                _ => None,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Some(Action::ChoiceNext),
                MouseEventKind::ScrollUp => Some(Action::ChoicePrev),
                _ => None,
            },
            _ => None,
        },
        AppMode::Help => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
                _ => None,
            },
            _ => None,
        },
        AppMode::Move | AppMode::Normal => match event {
            Event::Key(key) => app_state.keymap.get_action(key, app_state.mode),
            Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size),
            _ => None,
        },
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, terminal_size: Size) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let tree_inner = ui::get_layout(area).tree_inner();
    let zone = resolve_drop_zone(app_state, tree_inner, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::SelectPrev),
        MouseEventKind::ScrollDown => Some(Action::SelectNext),
        MouseEventKind::Down(MouseButton::Left) => match (app_state.mode, zone) {
            (AppMode::Normal, DropZone::Row(i)) => Some(Action::PointerDown(i)),
            (AppMode::Move, DropZone::Row(i)) => Some(Action::SelectIndex(i)),
            _ => None,
        },
        MouseEventKind::Up(MouseButton::Left) if app_state.pointer_origin.is_some() => {
            Some(Action::PointerUp(zone))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Command, Folder};
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.set_folders(vec![
            Folder::with_commands("default", vec![Command::new("Status", "git status")]),
            Folder::new("work"),
        ]);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    const SIZE: Size = Size {
        width: 80,
        height: 24,
    };

    #[test]
    fn test_press_on_row_starts_pointer() {
        let state = state();
        // Header row, then the tree border, then the first row.
        let down = MouseEventKind::Down(MouseButton::Left);
        let action = map_event_to_action(mouse(down, 5, 2), &state, SIZE);
        assert_eq!(action, Some(Action::PointerDown(0)));

        let action = map_event_to_action(mouse(down, 5, 4), &state, SIZE);
        assert_eq!(action, Some(Action::PointerDown(2)));
    }

    #[test]
    fn test_release_zones() {
        let mut state = state();
        let up = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(map_event_to_action(mouse(up, 5, 3), &state, SIZE), None);

        state.pointer_origin = Some(1);
        assert_eq!(
            map_event_to_action(mouse(up, 5, 3), &state, SIZE),
            Some(Action::PointerUp(DropZone::Row(1)))
        );
        assert_eq!(
            map_event_to_action(mouse(up, 5, 15), &state, SIZE),
            Some(Action::PointerUp(DropZone::Root))
        );
        assert_eq!(
            map_event_to_action(mouse(up, 5, 23), &state, SIZE),
            Some(Action::PointerUp(DropZone::Outside))
        );
    }

    #[test]
    fn test_prompt_captures_keys() {
        let mut state = state();
        state.mode = AppMode::Input;
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('q')), &state, SIZE),
            Some(Action::TextAreaInput(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::empty()
            )))
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state, SIZE),
            Some(Action::SubmitInput)
        );
    }

    #[test]
    fn test_choice_and_help_keys() {
        let mut state = state();
        state.mode = AppMode::Choice;
        assert_eq!(
            map_event_to_action(key(KeyCode::Down), &state, SIZE),
            Some(Action::ChoiceNext)
        );
        assert_eq!(map_event_to_action(key(KeyCode::Char('d')), &state, SIZE), None);

        state.mode = AppMode::Help;
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('q')), &state, SIZE),
            Some(Action::ToggleHelp)
        );
    }

    #[test]
    fn test_move_mode_uses_overrides() {
        let mut state = state();
        state.mode = AppMode::Move;
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state, SIZE),
            Some(Action::DropOnSelected)
        );
        assert_eq!(map_event_to_action(key(KeyCode::Char('d')), &state, SIZE), None);
    }
}
