mod choice;
mod help;
mod helpers;
mod text_input;
mod toast;

use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use choice::ChoiceModal;
use help::HelpModal;
use helpers::dim_area;
use text_input::TextInputModal;
use toast::ErrorToast;

/// Draws whatever overlays the current mode calls for, then the error toast.
pub struct ModalManager<'a, 'b> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'b>,
}

impl Widget for ModalManager<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.app_state;

        // --- Visual Dimming ---
        if matches!(state.mode, AppMode::Input | AppMode::Choice | AppMode::Help) {
            dim_area(buf, area);
        }

        match state.mode {
            AppMode::Help => HelpModal { theme: self.theme }.render(area, buf),
            AppMode::Input => {
                if let Some(prompt) = &state.prompt {
                    TextInputModal {
                        theme: self.theme,
                        prompt,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Choice => {
                if let Some(choice) = &state.choice {
                    ChoiceModal {
                        theme: self.theme,
                        state: choice,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Normal | AppMode::Move => {}
        }

        // --- Error Toast ---
        if let Some(error) = &state.last_error {
            ErrorToast {
                theme: self.theme,
                error,
            }
            .render(area, buf);
        }
    }
}
