use crate::domain::models::{CommandNode, Folder, FolderNode};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use tui_textarea::{CursorMove, TextArea};

#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        area.set_placeholder_text(self.0.placeholder_text().to_string());
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}

impl AppTextArea<'_> {
    /// Single-line text with a placeholder and an optional initial value.
    #[must_use]
    pub fn single_line(placeholder: Option<&str>, initial: Option<&str>) -> Self {
        let mut area = TextArea::default();
        if let Some(placeholder) = placeholder {
            area.set_placeholder_text(placeholder.to_string());
        }
        if let Some(initial) = initial {
            area.insert_str(initial);
        }
        Self(area)
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.0.lines().join("")
    }
}

/// What a text prompt feeds into once submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPurpose {
    NewFolder,
    RenameFolder(FolderNode),
    NewCommandLabel(FolderNode),
    NewCommandText { folder: FolderNode, label: String },
    EditCommandLabel(CommandNode),
    EditCommandText { node: CommandNode, label: String },
    ExportPath,
    ImportPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptState<'a> {
    pub purpose: PromptPurpose,
    pub title: String,
    pub text_area: AppTextArea<'a>,
}

impl PromptState<'_> {
    #[must_use]
    pub fn new(
        purpose: PromptPurpose,
        title: impl Into<String>,
        placeholder: Option<&str>,
        initial: Option<&str>,
    ) -> Self {
        Self {
            purpose,
            title: title.into(),
            text_area: AppTextArea::single_line(placeholder, initial),
        }
    }
}

/// What a pick-one-of-N prompt decides.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoicePurpose {
    DeleteFolder(FolderNode),
    DeleteCommand(CommandNode),
    MoveCommand {
        node: CommandNode,
        destinations: Vec<usize>,
    },
    ConfirmImport(Vec<Folder>),
}

pub const CONFIRM_OPTIONS: [&str; 2] = ["No", "Yes"];

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceState {
    pub purpose: ChoicePurpose,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: usize,
}

impl ChoiceState {
    #[must_use]
    pub fn confirm(purpose: ChoicePurpose, prompt: impl Into<String>) -> Self {
        Self {
            purpose,
            prompt: prompt.into(),
            options: CONFIRM_OPTIONS.iter().map(|o| (*o).to_string()).collect(),
            selected: 0,
        }
    }

    #[must_use]
    pub fn chosen(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }
}
