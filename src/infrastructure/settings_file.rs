use crate::domain::settings::SettingsBackend;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

pub const DEFAULT_SECTION: &str = "favoriteCommands";

/// Settings kept in one JSON document, one object per section:
///
/// ```json
/// { "favoriteCommands": { "folders": [ ... ] } }
/// ```
///
/// Sections and keys this backend does not own are left as they are.
/// Updates are serialized and land through a rename, so readers only ever
/// see a complete document.
pub struct JsonFileSettings {
    path: PathBuf,
    section: String,
    write_lock: Mutex<()>,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>, section: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            section: section.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        home::home_dir().map(|mut path| {
            path.push(".config");
            path.push("favcmd");
            path.push("settings.json");
            path
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        let document: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", self.path.display()))?;
        match document {
            Value::Object(map) => Ok(map),
            _ => bail!("{} does not contain a JSON object", self.path.display()),
        }
    }

    async fn write_document(&self, document: Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let content = serde_json::to_string_pretty(&Value::Object(document))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)
                .with_context(|| format!("failed to create a temp file in {}", dir.display()))?;
            tmp.write_all(content.as_bytes())
                .with_context(|| format!("failed to write {}", tmp.path().display()))?;
            tmp.persist(&path)
                .map_err(|e| e.error)
                .with_context(|| format!("failed to replace {}", path.display()))?;
            Ok(())
        })
        .await
        .context("settings writer stopped")??;
        Ok(())
    }
}

#[async_trait]
impl SettingsBackend for JsonFileSettings {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let document = self.read_document().await?;
        Ok(document
            .get(&self.section)
            .and_then(|section| section.get(key))
            .cloned())
    }

    async fn update(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let section = document
            .entry(self.section.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !section.is_object() {
            *section = Value::Object(Map::new());
        }
        if let Value::Object(map) = section {
            map.insert(key.to_string(), value);
        }
        self.write_document(document).await
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}
