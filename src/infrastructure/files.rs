use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "cli-favorites.json";

/// Resolves user input against `base`, expanding a leading `~`.
pub fn resolve_path(base: &Path, input: &str) -> PathBuf {
    let path = expand_home(input.trim());
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Like [`resolve_path`], adding the `.json` extension when none was given.
pub fn resolve_export_path(base: &Path, input: &str) -> PathBuf {
    let path = resolve_path(base, input);
    if path.extension().is_none() {
        path.with_extension("json")
    } else {
        path
    }
}

pub fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = home::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

pub async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}
