use crate::domain::models::{Command as SavedCommand, CommandNode, Folder, FolderNode};
use crate::domain::reorder::MovePlan;
use crate::theme::PaletteType;

/// Side effects the reducer asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadTree,
    AddFolder(String),
    RenameFolder(FolderNode, String),
    DeleteFolder(FolderNode),
    AddCommand(FolderNode, SavedCommand),
    EditCommand(CommandNode, SavedCommand),
    DeleteCommand(CommandNode),
    MoveCommandTo(CommandNode, usize),
    MoveItem(MovePlan),
    Export(String),     // Path as typed by the user
    ReadImport(String), // Path as typed by the user
    ReplaceAll(Vec<Folder>),
    Run(String),
    Copy(String),
    SaveTheme(PaletteType),
}
