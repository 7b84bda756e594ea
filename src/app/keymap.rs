use super::action::Action;
use super::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
    /// Overrides while an item is being carried.
    pub move_mode: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        let mut move_mode = HashMap::new();

        // --- Global / Normal Mode ---
        global.insert(key(KeyCode::Char('q')), Action::Quit);
        global.insert(key(KeyCode::Char('j')), Action::SelectNext);
        global.insert(key(KeyCode::Down), Action::SelectNext);
        global.insert(key(KeyCode::Char('k')), Action::SelectPrev);
        global.insert(key(KeyCode::Up), Action::SelectPrev);
        global.insert(key(KeyCode::Tab), Action::ToggleFolder);
        global.insert(key(KeyCode::Enter), Action::RunSelected);
        global.insert(key(KeyCode::Char('y')), Action::CopySelected);
        global.insert(key(KeyCode::Char('N')), Action::NewFolderIntent);
        global.insert(key(KeyCode::Char('r')), Action::RenameFolderIntent);
        global.insert(key(KeyCode::Char('a')), Action::AddCommandIntent);
        global.insert(key(KeyCode::Char('e')), Action::EditCommandIntent);
        global.insert(key(KeyCode::Char('d')), Action::DeleteIntent);
        global.insert(key(KeyCode::Char('M')), Action::MoveToFolderIntent);
        global.insert(key(KeyCode::Char(' ')), Action::ToggleMark);
        global.insert(key(KeyCode::Char('m')), Action::GrabSelection);
        global.insert(key(KeyCode::Char('E')), Action::ExportIntent);
        global.insert(key(KeyCode::Char('I')), Action::ImportIntent);
        global.insert(key(KeyCode::F(5)), Action::Refresh);
        global.insert(key(KeyCode::Char('t')), Action::CycleTheme);
        global.insert(key(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(key(KeyCode::Esc), Action::CancelMode);

        // --- Move Mode Overrides ---
        move_mode.insert(key(KeyCode::Enter), Action::DropOnSelected);
        move_mode.insert(key(KeyCode::Char('R')), Action::DropOnRoot);

        Self { global, move_mode }
    }
}

impl KeyMap {
    pub fn get_action(&self, event: KeyEvent, mode: AppMode) -> Option<Action> {
        let event = normalize(event);
        if mode == AppMode::Move {
            if let Some(action) = self.move_mode.get(&event) {
                return Some(action.clone());
            }
            // Only navigation and cancelling make sense while carrying.
            return self.global.get(&event).cloned().filter(|a| {
                matches!(
                    a,
                    Action::SelectNext
                        | Action::SelectPrev
                        | Action::ToggleFolder
                        | Action::CancelMode
                        | Action::Quit
                )
            });
        }
        self.global.get(&event).cloned()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// Terminals report `N` as `Shift+N`; the map stores the bare character.
fn normalize(event: KeyEvent) -> KeyEvent {
    let modifiers = match event.code {
        KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
        _ => event.modifiers,
    };
    KeyEvent::new(event.code, modifiers)
}
