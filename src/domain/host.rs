use anyhow::Result;

/// Receives text the user copied from a command.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Runs a command line on the user's behalf. Returns whether it succeeded.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutionSink: Send + Sync {
    fn send(&self, line: &str) -> Result<bool>;
}
