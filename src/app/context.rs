use crate::domain::host::{ClipboardSink, ExecutionSink};
use crate::domain::launcher::Launcher;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything side effects need to reach the outside world.
#[derive(Clone)]
pub struct AppContext {
    pub launcher: Launcher,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub executor: Arc<dyn ExecutionSink>,
    /// Relative export and import paths resolve against this directory.
    pub workdir: PathBuf,
    /// Where the theme choice is saved. `None` disables saving.
    pub config_path: Option<PathBuf>,
}
