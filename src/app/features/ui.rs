use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, ErrorState},
};
use crate::theme::Theme;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Quit => {
            state.should_quit = true;
            UpdateResult::Handled(None)
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            expire_notifications(state, Instant::now());
            UpdateResult::Handled(None)
        }
        Action::Resize(_, _) => UpdateResult::Handled(None),
        Action::CancelMode => {
            state.mode = AppMode::Normal;
            state.prompt = None;
            state.choice = None;
            state.dragging = None;
            state.pointer_origin = None;
            state.last_error = None;
            state.tree.marked.clear();
            UpdateResult::Handled(None)
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
            UpdateResult::Handled(None)
        }
        Action::CycleTheme => {
            state.palette_type = state.palette_type.next();
            state.theme = Theme::from_palette_type(state.palette_type);
            UpdateResult::Handled(Some(Command::SaveTheme(state.palette_type)))
        }

        // --- Async Results ---
        Action::TreeLoaded(folders) => {
            state.set_folders(folders.clone());
            UpdateResult::Handled(None)
        }
        Action::OperationStarted(msg) => {
            state.active_tasks.push(msg.clone());
            UpdateResult::Handled(None)
        }
        Action::OperationCompleted(result) => {
            if !state.active_tasks.is_empty() {
                state.active_tasks.remove(0);
            }
            match result {
                Ok(msg) => state.set_status(msg.clone()),
                Err(err) => state.set_error(ErrorState::error(err.clone())),
            }
            UpdateResult::Handled(None)
        }
        Action::ErrorOccurred(err) => {
            state.set_error(ErrorState::error(err.clone()));
            UpdateResult::Handled(None)
        }
        Action::Notify(msg) => {
            state.set_status(msg.clone());
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn expire_notifications(state: &mut AppState, now: Instant) {
    let expired =
        |at: Option<Instant>| at.is_some_and(|t| now.duration_since(t) >= NOTIFICATION_TIMEOUT);
    if expired(state.status_time) {
        state.status_message = None;
        state.status_time = None;
    }
    if expired(state.error_time) {
        state.last_error = None;
        state.error_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::PaletteType;

    #[test]
    fn test_notifications_expire() {
        let mut state = AppState::default();
        state.set_status("Commands exported successfully!");
        state.set_error(ErrorState::error("boom"));

        let later = Instant::now() + NOTIFICATION_TIMEOUT;
        expire_notifications(&mut state, later);

        assert!(state.status_message.is_none());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_operation_lifecycle() {
        let mut state = AppState::default();
        update(&mut state, &Action::OperationStarted("Exporting...".to_string()));
        assert_eq!(state.active_tasks.len(), 1);

        update(
            &mut state,
            &Action::OperationCompleted(Err("Error: disk full".to_string())),
        );
        assert!(state.active_tasks.is_empty());
        assert_eq!(state.last_error.unwrap().message, "Error: disk full");
    }

    #[test]
    fn test_cycle_theme_persists_choice() {
        let mut state = AppState::default();
        let result = update(&mut state, &Action::CycleTheme);
        assert_eq!(state.palette_type, PaletteType::Nord);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::SaveTheme(PaletteType::Nord)))
        ));
    }
}
