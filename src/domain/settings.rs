use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Key under which the folder collection is persisted.
pub const FOLDERS_KEY: &str = "folders";

/// A scoped key-value configuration store.
///
/// Values are whole JSON documents; there are no partial updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn update(&self, key: &str, value: Value) -> Result<()>;

    // Where the values live on disk, if anywhere. Used to watch for edits
    // made by other processes.
    fn location(&self) -> Option<PathBuf>;
}
