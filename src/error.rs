use thiserror::Error;

/// Failures a launcher action can report back to the user.
///
/// None of these are fatal: the loop turns them into a toast and keeps
/// running. `Lookup` is the one variant callers swallow on purpose.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("The \"{name}\" folder cannot be {action}.")]
    ProtectedFolder { name: String, action: &'static str },

    #[error("Invalid JSON format. {0}")]
    Format(String),

    #[error("Failed to access settings: {0}")]
    Persistence(String),

    #[error("Folder \"{0}\" no longer exists")]
    Lookup(String),

    #[error("The tree changed since it was drawn, refresh and try again")]
    StaleNode,

    #[error("A folder named \"{0}\" already exists.")]
    DuplicateFolder(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

pub type LauncherResult<T> = std::result::Result<T, LauncherError>;
