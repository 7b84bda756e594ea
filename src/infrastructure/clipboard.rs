use crate::domain::host::ClipboardSink;
use anyhow::{Context, Result};
use std::sync::Mutex;

/// The desktop clipboard. Opened lazily so that a headless session only
/// fails when something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().context("clipboard is not available")?);
        }
        if let Some(clipboard) = guard.as_mut() {
            clipboard
                .set_text(text.to_string())
                .context("failed to write to the clipboard")?;
        }
        Ok(())
    }
}
