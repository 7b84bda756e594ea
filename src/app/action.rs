use crate::app::command::Command;
use crate::domain::models::Folder;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

/// Where a mouse drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Row(usize), // On a tree row
    Root,       // On the empty part of the tree panel
    Outside,    // Anywhere else
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Navigation ---
    SelectNext,
    SelectPrev,
    SelectIndex(usize),
    ToggleFolder, // Collapse / expand the selected folder
    ToggleMark,   // Mark the selected row for a drag

    // --- Launcher Intents ---
    // These act on the selected row and may open a prompt first
    RunSelected,        // Run the selected command, or toggle a folder
    CopySelected,       // Copy the selected command line
    NewFolderIntent,    // Ask for a folder name
    RenameFolderIntent, // Ask for a new folder name
    AddCommandIntent,   // Ask for label, then command line
    EditCommandIntent,  // Same prompts, prefilled
    DeleteIntent,       // Confirm, then delete folder or command
    MoveToFolderIntent, // Pick a destination folder
    ExportIntent,       // Ask for the export file
    ImportIntent,       // Ask for the import file
    Refresh,            // Reload the tree from the store

    // --- Drag and Drop ---
    GrabSelection,    // Pick up marked-or-selected item (keyboard drag)
    DropOnSelected,   // Drop the carried item on the selected row
    DropOnRoot,       // Drop the carried item on the root
    PointerDown(usize),
    PointerUp(DropZone),

    // --- UI Mode Transitions ---
    CancelMode,
    ToggleHelp,
    CycleTheme,
    TextAreaInput(crossterm::event::KeyEvent),
    SubmitInput,
    ChoiceNext,
    ChoicePrev,
    ChoiceSelect,

    // --- Async Results ---
    TreeLoaded(Vec<Folder>),
    ImportParsed(Vec<Folder>), // A file was read; waiting for confirmation
    OperationStarted(String),
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
    Notify(String),
    ExternalChangeDetected, // The settings file changed on disk
}
