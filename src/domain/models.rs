use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_FOLDER_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub command: String,
}

impl Command {
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commands: Vec<Command>,
}

// Hand-edited settings sometimes carry `"commands": null`.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn with_commands(name: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_FOLDER_NAME
    }
}

/// View projection of a folder for one render pass.
///
/// `folder_index` is a position in the collection the node was built from.
/// It stays valid only until the next mutation; operations that accept a
/// node re-check it against the freshly loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub commands: Vec<Command>,
    pub folder_index: usize,
    pub is_default: bool,
}

impl FolderNode {
    pub fn from_folder(folder: &Folder, folder_index: usize) -> Self {
        Self {
            name: folder.name.clone(),
            commands: folder.commands.clone(),
            folder_index,
            is_default: folder.is_default(),
        }
    }
}

/// View projection of a command. Same index contract as [`FolderNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    pub label: String,
    pub command: String,
    pub folder_index: usize,
    pub command_index: usize,
}

impl CommandNode {
    pub fn to_command(&self) -> Command {
        Command::new(self.label.clone(), self.command.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Folder(FolderNode),
    Command(CommandNode),
}

impl Node {
    pub fn folder_index(&self) -> usize {
        match self {
            Node::Folder(f) => f.folder_index,
            Node::Command(c) => c.folder_index,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Folder(f) => &f.name,
            Node::Command(c) => &c.label,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::Folder(f) => Some(f),
            Node::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandNode> {
        match self {
            Node::Command(c) => Some(c),
            Node::Folder(_) => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Folder(folder) => write!(f, "folder \"{}\"", folder.name),
            Node::Command(cmd) => write!(f, "command \"{}\"", cmd.label),
        }
    }
}

pub fn total_commands(folders: &[Folder]) -> usize {
    folders.iter().map(|f| f.commands.len()).sum()
}
