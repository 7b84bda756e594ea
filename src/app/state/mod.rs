use super::keymap::KeyMap;
use crate::domain::models::{total_commands, Folder, Node};
use crate::theme::{PaletteType, Theme};
use std::sync::Arc;
use std::time::Instant;

pub mod error;
pub mod input;
pub mod tree;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use input::{AppTextArea, ChoicePurpose, ChoiceState, PromptPurpose, PromptState};
pub use tree::TreeState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal, // Navigating the tree
    Input,  // A text prompt is open
    Choice, // Picking one of several options
    Move,   // Carrying an item, waiting for a drop target
    Help,   // Showing the help overlay
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub error_time: Option<Instant>,
    pub status_message: Option<String>,
    pub status_time: Option<Instant>,
    pub active_tasks: Vec<String>,

    // --- Data (last loaded snapshot) ---
    pub folders: Vec<Folder>,
    pub tree: TreeState,

    // --- Prompts ---
    pub prompt: Option<PromptState<'a>>,
    pub choice: Option<ChoiceState>,

    // --- Drag and drop ---
    pub dragging: Option<Node>,
    pub pointer_origin: Option<usize>,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: PaletteType,
    pub theme: Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(palette_type: PaletteType) -> Self {
        Self {
            palette_type,
            theme: Theme::from_palette_type(palette_type),
            ..Default::default()
        }
    }

    pub fn set_folders(&mut self, folders: Vec<Folder>) {
        self.tree.rebuild(&folders);
        self.folders = folders;
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.tree.selected_node()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    pub fn set_error(&mut self, error: ErrorState) {
        self.last_error = Some(error);
        self.error_time = Some(Instant::now());
    }

    #[must_use]
    pub fn stats(&self) -> String {
        format!(
            " {} folders · {} commands ",
            self.folders.len(),
            total_commands(&self.folders)
        )
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            error_time: None,
            status_message: None,
            status_time: None,
            active_tasks: Vec::new(),
            folders: Vec::new(),
            tree: TreeState::default(),
            prompt: None,
            choice: None,
            dragging: None,
            pointer_origin: None,
            frame_count: 0,
            keymap: Arc::new(KeyMap::default()),
            palette_type: PaletteType::CatppuccinMocha,
            theme: Theme::default(),
        }
    }
}
